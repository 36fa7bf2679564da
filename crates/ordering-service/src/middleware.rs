//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将用户信息注入请求扩展

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::state::AppState;

/// 认证中间件
///
/// 从 Authorization header 中提取 Bearer Token，验证后将 Claims
/// 注入请求扩展。受保护路由的 handler 通过 Extension 取回已验证
/// 的用户身份，不再各自解析 Token。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("缺少认证 Token");
        }
    };

    match state.jwt_manager.verify_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => unauthorized_response(&e.to_string()),
    }
}

/// 生成 401 未授权响应
fn unauthorized_response(message: &str) -> Response {
    let body = json!({
        "success": false,
        "code": "UNAUTHORIZED",
        "message": message,
        "data": null
    });

    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}

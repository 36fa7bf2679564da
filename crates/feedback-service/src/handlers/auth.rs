//! 认证相关的 HTTP 处理器

use axum::{Json, extract::State};
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, LoginRequest, LoginResponse};
use crate::error::{FeedbackError, Result};
use crate::state::AppState;

/// 用户登录
///
/// 用户记录由订单事件创建，不携带凭据，因此只校验用户存在性，
/// password 字段被接收但不参与验证。
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    req.validate()?;

    let user = state
        .repository
        .find_user_by_username(&req.username)
        .await?
        .ok_or(FeedbackError::InvalidCredentials)?;

    let token = state.jwt_manager.generate_token(user.id, &user.username)?;
    info!(user_id = user.id, username = %user.username, "登录成功");

    Ok(Json(ApiResponse::success(LoginResponse { token })))
}

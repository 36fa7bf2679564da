//! 认证相关的 HTTP 处理器

use axum::{Json, extract::State};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::{ApiResponse, LoginRequest, LoginResponse};
use crate::error::{OrderError, Result};
use crate::state::AppState;

/// 用户登录
///
/// 校验用户名与密码，成功后签发带 user_id 的 JWT Token。
/// 用户不存在与密码错误返回同一个错误，不泄露账号是否存在。
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    req.validate()?;

    let user = state
        .repository
        .find_user_by_username(&req.username)
        .await?
        .ok_or(OrderError::InvalidCredentials)?;

    if user.password != req.password {
        warn!(username = %req.username, "登录失败：密码错误");
        return Err(OrderError::InvalidCredentials);
    }

    let token = state.jwt_manager.generate_token(user.id, &user.username)?;
    info!(user_id = user.id, username = %user.username, "登录成功");

    Ok(Json(ApiResponse::success(LoginResponse { token })))
}

//! 用户信息相关的 HTTP 处理器

use axum::{Extension, Json, extract::State};

use crate::auth::Claims;
use crate::dto::ApiResponse;
use crate::error::Result;
use crate::models::User;
use crate::state::AppState;

/// 获取当前登录用户的资料
///
/// 用户身份来自认证中间件注入的 Claims，密码字段在序列化时被跳过。
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<User>>> {
    let user = state.repository.find_user_by_id(claims.user_id).await?;
    Ok(Json(ApiResponse::success(user)))
}

//! 反馈相关的 HTTP 处理器

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::auth::Claims;
use crate::dto::{
    ApiResponse, CreateFeedbackRequest, FeedbackStats, UpdateFeedbackRequest,
};
use crate::error::Result;
use crate::models::Feedback;
use crate::state::AppState;

/// 当前用户的反馈列表
pub async fn list_feedback(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<Feedback>>>> {
    let feedbacks = state.repository.list_by_user(claims.user_id).await?;
    Ok(Json(ApiResponse::success(feedbacks)))
}

/// 提交反馈
///
/// 每个用户对每个订单只能提交一条，重复提交返回 409。
pub async fn create_feedback(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Feedback>>)> {
    req.validate()?;

    let feedback = state
        .repository
        .create(claims.user_id, req.order_id, req.rating, req.comment.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(feedback, "反馈提交成功")),
    ))
}

/// 更新反馈
pub async fn update_feedback(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(feedback_id): Path<i64>,
    Json(req): Json<UpdateFeedbackRequest>,
) -> Result<Json<ApiResponse<Feedback>>> {
    req.validate()?;

    let feedback = state
        .repository
        .update(claims.user_id, feedback_id, req.rating, req.comment.as_deref())
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        feedback,
        "反馈更新成功",
    )))
}

/// 删除反馈
pub async fn delete_feedback(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(feedback_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.repository.delete(claims.user_id, feedback_id).await?;
    Ok(Json(ApiResponse::<()>::success_empty("反馈删除成功")))
}

/// 反馈统计
pub async fn feedback_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FeedbackStats>>> {
    let stats = state.repository.stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

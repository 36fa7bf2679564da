//! 菜品相关的 HTTP 处理器

use axum::{Json, extract::State};

use crate::dto::ApiResponse;
use crate::error::Result;
use crate::models::FoodItem;
use crate::state::AppState;

/// 菜品列表
///
/// 公开端点，返回全部菜品的当前价格与剩余库存。
pub async fn list_food_items(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FoodItem>>>> {
    let items = state.repository.list_food_items().await?;
    Ok(Json(ApiResponse::success(items)))
}

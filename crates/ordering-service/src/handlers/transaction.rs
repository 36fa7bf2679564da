//! 结算相关的 HTTP 处理器

use axum::{Extension, Json, extract::State};

use crate::auth::Claims;
use crate::dto::{ApiResponse, TransactionRequest};
use crate::error::Result;
use crate::models::Order;
use crate::state::AppState;

/// 结算订单
///
/// 只有订单归属人可以结算；库存不足或订单已不处于 pending
/// 状态时返回 409，订单保持原状可重试。
pub async fn settle_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<ApiResponse<Order>>> {
    let order = state
        .order_service
        .settle_order(claims.user_id, req.order_id)
        .await?;

    Ok(Json(ApiResponse::success_with_message(order, "订单结算成功")))
}

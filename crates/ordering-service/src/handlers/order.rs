//! 下单相关的 HTTP 处理器

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::auth::Claims;
use crate::dto::{ApiResponse, PlaceOrderRequest, PlaceOrderResponse};
use crate::error::Result;
use crate::state::AppState;

/// 创建订单
///
/// 订单归属取自 Token 中的 user_id，请求体只携带条目列表。
/// 总价在服务端按当前单价计算并冻结，客户端无法指定。
pub async fn place_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<ApiResponse<PlaceOrderResponse>>> {
    req.validate()?;

    let response = state
        .order_service
        .place_order(claims.user_id, &req.items)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        response,
        "订单创建成功",
    )))
}

//! 请求/响应 DTO
//!
//! HTTP API 的字段名沿用既有客户端约定（snake_case）。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 统一 API 响应信封
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "用户名长度必须在 1-50 之间"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "密码长度必须在 1-100 之间"))]
    pub password: String,
}

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// 下单请求中的单个条目
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub food_item_id: i64,
    #[validate(range(min = 1, message = "数量必须为正整数"))]
    pub quantity: i32,
}

/// 下单请求
#[derive(Debug, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, message = "订单至少包含一个条目"))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

/// 下单响应
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub order_id: i64,
    pub total_price: Decimal,
}

/// 结算请求
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub order_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_request_rejects_zero_quantity() {
        let req = PlaceOrderRequest {
            items: vec![OrderItemRequest {
                food_item_id: 1,
                quantity: 0,
            }],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_place_order_request_rejects_empty_items() {
        let req = PlaceOrderRequest { items: vec![] };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_place_order_request_accepts_valid_items() {
        let req = PlaceOrderRequest {
            items: vec![
                OrderItemRequest {
                    food_item_id: 1,
                    quantity: 2,
                },
                OrderItemRequest {
                    food_item_id: 2,
                    quantity: 1,
                },
            ],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_api_response_envelope() {
        let resp = ApiResponse::success(serde_json::json!({"order_id": 1}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], "SUCCESS");
        assert_eq!(json["data"]["order_id"], 1);
    }
}

//! 点餐服务错误类型定义
//!
//! 覆盖下单/结算工作流的完整错误分类，并映射为 HTTP 响应。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use restaurant_shared::error::RestaurantError;
use restaurant_shared::events::OrderStatus;

/// 点餐服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("用户名或密码错误")]
    InvalidCredentials,

    // 资源不存在
    #[error("用户不存在: {0}")]
    UserNotFound(i64),
    #[error("菜品不存在: {0}")]
    FoodItemNotFound(i64),
    #[error("订单不存在: {0}")]
    OrderNotFound(i64),

    // 业务错误
    /// 结算人不是订单归属用户，工作流内部的所有权校验失败
    #[error("无权处理该订单")]
    Forbidden,
    /// 订单不处于待结算状态（重复结算或结算已取消订单）
    #[error("订单当前状态不允许结算: {status}")]
    InvalidState { status: OrderStatus },
    /// 条件扣减未命中任何行，库存不足；携带不足的菜品信息
    #[error("菜品库存不足: {name} (id={food_item_id})")]
    InsufficientStock { food_item_id: i64, name: String },

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl OrderError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,

            Self::UserNotFound(_) | Self::FoodItemNotFound(_) | Self::OrderNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            Self::Validation(_) => StatusCode::BAD_REQUEST,

            // 请求合法但与当前资源状态冲突
            Self::InvalidState { .. } | Self::InsufficientStock { .. } => StatusCode::CONFLICT,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::FoodItemNotFound(_) => "FOOD_ITEM_NOT_FOUND",
            Self::OrderNotFound(_) => "ORDER_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidState { .. } => "ORDER_NOT_PENDING",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for OrderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从共享库错误转换
impl From<RestaurantError> for OrderError {
    fn from(err: RestaurantError) -> Self {
        match err {
            RestaurantError::Database(e) => Self::Database(e),
            RestaurantError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, OrderError>;

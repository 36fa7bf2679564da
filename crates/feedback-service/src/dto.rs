//! 请求/响应 DTO 定义

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

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "OK".to_string(),
            message: "成功".to_string(),
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "OK".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn success_empty(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "OK".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// 登录请求
///
/// password 为必填字段但当前不做校验，用户记录来自订单事件，
/// 不携带凭据。
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

/// 提交反馈请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    pub order_id: i64,
    #[validate(range(min = 1, max = 5, message = "评分必须在 1-5 之间"))]
    pub rating: i16,
    pub comment: Option<String>,
}

/// 更新反馈请求
///
/// 两个字段都可省略，省略的字段保持原值。
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFeedbackRequest {
    #[validate(range(min = 1, max = 5, message = "评分必须在 1-5 之间"))]
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

/// 单个评分档位的数量
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RatingCount {
    pub rating: i16,
    pub count: i64,
}

/// 反馈统计响应
#[derive(Debug, Serialize)]
pub struct FeedbackStats {
    pub total_feedback: i64,
    pub average_rating: f64,
    pub rating_counts: Vec<RatingCount>,
}

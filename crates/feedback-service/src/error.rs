//! 反馈服务错误类型定义
//!
//! 覆盖认证、反馈 CRUD 与事件消费路径的错误分类，并映射为 HTTP 响应。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use restaurant_shared::error::RestaurantError;

/// 反馈服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("用户名或密码错误")]
    InvalidCredentials,

    // 资源不存在
    #[error("反馈不存在或无权操作: {0}")]
    FeedbackNotFound(i64),

    // 业务错误
    /// 同一用户对同一订单只能提交一条反馈
    #[error("已对订单 {order_id} 提交过反馈")]
    DuplicateFeedback { order_id: i64 },

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl FeedbackError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::FeedbackNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateFeedback { .. } => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::FeedbackNotFound(_) => "FEEDBACK_NOT_FOUND",
            Self::DuplicateFeedback { .. } => "DUPLICATE_FEEDBACK",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for FeedbackError {
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
impl From<validator::ValidationErrors> for FeedbackError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从共享库错误转换
impl From<RestaurantError> for FeedbackError {
    fn from(err: RestaurantError) -> Self {
        match err {
            RestaurantError::Database(e) => Self::Database(e),
            RestaurantError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, FeedbackError>;

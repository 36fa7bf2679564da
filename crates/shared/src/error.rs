//! 统一错误处理模块
//!
//! 定义两个服务共享的基础设施错误类型，使用 thiserror 提供良好的错误信息。
//! 各服务在此基础上定义自己面向 HTTP 的错误枚举。

use thiserror::Error;

/// 基础设施层错误类型
#[derive(Debug, Error)]
pub enum RestaurantError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: String, id: String },

    #[error("Kafka 错误: {0}")]
    Kafka(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, RestaurantError>;

impl RestaurantError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Kafka(_) => "KAFKA_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 数据库与 Kafka 错误通常是瞬时故障（连接抖动、broker 切主），
    /// 业务性错误重试没有意义。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Kafka(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = RestaurantError::NotFound {
            entity: "Order".to_string(),
            id: "42".to_string(),
        };
        assert_eq!(err.code(), "NOT_FOUND");

        let err = RestaurantError::Kafka("broker 不可达".to_string());
        assert_eq!(err.code(), "KAFKA_ERROR");
    }

    #[test]
    fn test_is_retryable() {
        let db_err = RestaurantError::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let kafka_err = RestaurantError::Kafka("发送超时".to_string());
        assert!(kafka_err.is_retryable());

        let not_found = RestaurantError::NotFound {
            entity: "FoodItem".to_string(),
            id: "1".to_string(),
        };
        assert!(!not_found.is_retryable());

        let validation = RestaurantError::Validation("数量必须为正".to_string());
        assert!(!validation.is_retryable());
    }

    #[test]
    fn test_display_contains_context() {
        let err = RestaurantError::NotFound {
            entity: "Order".to_string(),
            id: "7".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Order"));
        assert!(msg.contains("7"));
    }
}

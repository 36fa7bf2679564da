//! JWT Token 处理
//!
//! 与点餐服务使用相同的 Claims 形状与签名算法，两个服务共享
//! 同一份密钥配置时，点餐服务签发的 Token 在此同样有效。

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use restaurant_shared::config::AuthConfig;

use crate::error::FeedbackError;

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户 ID
    pub user_id: i64,
    /// 用户名
    pub username: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    expires_in_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: &AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self {
            expires_in_secs: config.token_expiry_seconds,
            encoding_key,
            decoding_key,
        }
    }

    /// 生成 JWT Token
    pub fn generate_token(&self, user_id: i64, username: &str) -> Result<String, FeedbackError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_secs);

        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| FeedbackError::Internal(format!("JWT 生成失败: {}", e)))
    }

    /// 验证并解析 JWT Token
    pub fn verify_token(&self, token: &str) -> Result<Claims, FeedbackError> {
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        FeedbackError::Unauthorized("Token 已过期".to_string())
                    }
                    _ => FeedbackError::Unauthorized("无效的 Token".to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> JwtManager {
        JwtManager::new(&AuthConfig {
            jwt_secret: "feedback-test-secret".to_string(),
            token_expiry_seconds: 3600,
        })
    }

    #[test]
    fn test_token_round_trip() {
        let manager = test_manager();
        let token = manager.generate_token(42, "testuser").unwrap();
        let claims = manager.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "testuser");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = test_manager();
        let token = manager.generate_token(1, "a").unwrap();

        let other = JwtManager::new(&AuthConfig {
            jwt_secret: "different-secret".to_string(),
            token_expiry_seconds: 3600,
        });
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = test_manager();
        assert!(manager.verify_token("not-a-jwt").is_err());
    }
}

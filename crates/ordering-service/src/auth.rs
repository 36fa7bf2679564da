//! JWT Token 处理
//!
//! 提供 JWT Token 的生成和验证功能。Claims 在信任边界处被解码为
//! 静态校验的结构体，缺失或畸形的声明在进入业务逻辑之前就被拒绝。

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use restaurant_shared::config::AuthConfig;

use crate::error::OrderError;

/// JWT Claims（Token 载荷）
///
/// 所有字段必填；缺少任何一个的 Token 在解码阶段直接失败。
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
    /// 创建 JWT 管理器
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
    pub fn generate_token(&self, user_id: i64, username: &str) -> Result<String, OrderError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_secs);

        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| OrderError::Internal(format!("JWT 生成失败: {}", e)))
    }

    /// 验证并解析 JWT Token
    ///
    /// 返回解析后的 Claims，Token 无效或过期则返回错误
    pub fn verify_token(&self, token: &str) -> Result<Claims, OrderError> {
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        OrderError::Unauthorized("Token 已过期".to_string())
                    }
                    _ => OrderError::Unauthorized("无效的 Token".to_string()),
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
            jwt_secret: "test-secret".to_string(),
            token_expiry_seconds: 3600,
        })
    }

    #[test]
    fn test_generate_and_verify_round_trip() {
        let manager = test_manager();
        let token = manager.generate_token(42, "testuser").unwrap();

        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "testuser");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage_token() {
        let manager = test_manager();
        let result = manager.verify_token("not-a-jwt");
        assert!(matches!(result, Err(OrderError::Unauthorized(_))));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let manager = test_manager();
        let token = manager.generate_token(1, "alice").unwrap();

        let other = JwtManager::new(&AuthConfig {
            jwt_secret: "different-secret".to_string(),
            token_expiry_seconds: 3600,
        });
        assert!(other.verify_token(&token).is_err());
    }

    /// 缺少必填声明的 Token 必须在解码阶段被拒绝，不能流入业务逻辑
    #[test]
    fn test_verify_rejects_missing_claims() {
        #[derive(Serialize)]
        struct PartialClaims {
            username: String,
            iat: i64,
            exp: i64,
        }

        let partial = PartialClaims {
            username: "ghost".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::default(),
            &partial,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let manager = test_manager();
        assert!(manager.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            // 负数过期时间直接生成已过期的 Token
            token_expiry_seconds: -120,
        });
        let token = manager.generate_token(1, "late").unwrap();

        match test_manager().verify_token(&token) {
            Err(OrderError::Unauthorized(msg)) => assert!(msg.contains("过期")),
            other => panic!("期望 Unauthorized(过期)，实际: {:?}", other),
        }
    }
}

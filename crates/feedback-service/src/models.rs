//! 数据库模型定义
//!
//! 用户表由订单事件消费路径维护，反馈表由 REST API 维护。

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// 用户
///
/// 记录由订单事件按需创建，用户名是事件落库时生成的占位值，
/// 不承载认证之外的业务含义。
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// 订单反馈
///
/// 每个用户对每个订单最多一条，由 (order_id, user_id) 唯一约束保证。
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: i64,
    pub order_id: i64,
    pub user_id: i64,
    /// 1-5 分
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! 数据库模型定义
//!
//! 对应四张关系表：users、food_items、orders、order_items。
//! 金额统一使用 Decimal，避免二进制浮点在累加中产生漂移。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use restaurant_shared::events::OrderStatus;

/// 用户
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// 仅服务内部使用，序列化时永不输出
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub address: Option<String>,
}

/// 菜品
///
/// `quantity` 为当前可售库存，只能通过结算事务内的条件扣减语句变更。
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// 订单
///
/// `total_price` 在下单时刻按当时单价冻结，之后不再重算。
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// 订单条目
///
/// 随父订单在同一事务内创建，创建后不可变。
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub food_item_id: i64,
    pub quantity: i32,
    /// 下单时刻冻结的单价
    pub unit_price: Decimal,
}

//! 订单事件模型
//!
//! 定义点餐服务与反馈服务之间通过 Kafka 传递的订单事件线格式。
//! 字段名是两个服务之间的线上契约，任何改动都是破坏性变更。

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// 订单状态
///
/// 数据库列与事件负载共用同一枚举：列以小写字符串存储（varchar），
/// JSON 序列化同样为小写，保证两侧读到的状态字面值一致。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum OrderStatus {
    /// 待结算 - 下单完成，价格已冻结，库存尚未扣减
    #[default]
    Pending,
    /// 已完成 - 结算成功，库存已扣减
    Completed,
    /// 已取消 - 不再参与结算
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OrderEvent
// ---------------------------------------------------------------------------

/// 订单事件中的单个条目
///
/// `name` 是事件构造时刻的菜品名称快照，不是对菜品目录的实时引用。
/// 下单与结算之间菜名可能变化，消费方不得假设它反映当前目录状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEventItem {
    pub food_item_id: i64,
    pub name: String,
    pub quantity: i32,
}

/// 订单事件（线格式）
///
/// 生产侧不持久化此结构；它在数据库事务提交后构造并发往 Kafka。
/// `total_price` 在 JSON 中以数字表示，与历史消费方的解析方式兼容。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub order_id: i64,
    pub user_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub items: Vec<OrderEventItem>,
    /// 事件发出时间（unix 秒）
    pub timestamp: i64,
}

impl OrderEvent {
    /// 构造事件并记录当前时间
    pub fn new(
        order_id: i64,
        user_id: i64,
        total_price: Decimal,
        status: OrderStatus,
        items: Vec<OrderEventItem>,
    ) -> Self {
        Self {
            order_id,
            user_id,
            total_price,
            status,
            items,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Kafka 消息 key
    ///
    /// 以订单 ID 作为分区键，同一订单的所有事件落在同一分区，
    /// 保证单订单内的事件顺序。
    pub fn kafka_key(&self) -> String {
        self.order_id.to_string()
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}

// ---------------------------------------------------------------------------
// 单元测试
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn sample_event(status: OrderStatus) -> OrderEvent {
        OrderEvent {
            order_id: 42,
            user_id: 7,
            total_price: Decimal::new(3000, 2), // 30.00
            status,
            items: vec![
                OrderEventItem {
                    food_item_id: 1,
                    name: "Butter Chicken".to_string(),
                    quantity: 2,
                },
                OrderEventItem {
                    food_item_id: 2,
                    name: "Naan".to_string(),
                    quantity: 1,
                },
            ],
            timestamp: 1_700_000_000,
        }
    }

    /// 字段名是线上契约，逐一锁定
    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample_event(OrderStatus::Completed)).unwrap();

        assert_eq!(json["order_id"], 42);
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["status"], "completed");
        assert_eq!(json["timestamp"], 1_700_000_000i64);
        assert_eq!(json["items"][0]["food_item_id"], 1);
        assert_eq!(json["items"][0]["name"], "Butter Chicken");
        assert_eq!(json["items"][0]["quantity"], 2);

        // total_price 必须是 JSON 数字而非字符串
        assert!(json["total_price"].is_f64() || json["total_price"].is_u64());
        assert_eq!(json["total_price"].as_f64().unwrap(), 30.0);
    }

    #[test]
    fn test_status_serialized_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Completed.to_string(), "completed");
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_round_trip() {
        let event = sample_event(OrderStatus::Pending);
        let json = serde_json::to_string(&event).unwrap();
        let back: OrderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    /// 历史生产方以浮点数发送价格，反序列化必须兼容
    #[test]
    fn test_deserialize_float_price() {
        let json = r#"{
            "order_id": 1,
            "user_id": 2,
            "total_price": 30.0,
            "status": "completed",
            "items": [{"food_item_id": 1, "name": "Samosa", "quantity": 3}],
            "timestamp": 1700000000
        }"#;

        let event: OrderEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.total_price, Decimal::from_f64(30.0).unwrap());
        assert!(event.is_completed());
        assert_eq!(event.items.len(), 1);
    }

    #[test]
    fn test_kafka_key_is_order_id() {
        let event = sample_event(OrderStatus::Completed);
        assert_eq!(event.kafka_key(), "42");
    }

    #[test]
    fn test_new_sets_current_timestamp() {
        let before = Utc::now().timestamp();
        let event = OrderEvent::new(1, 2, Decimal::new(1000, 2), OrderStatus::Pending, vec![]);
        let after = Utc::now().timestamp();
        assert!(event.timestamp >= before && event.timestamp <= after);
    }
}

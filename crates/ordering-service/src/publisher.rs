//! 订单事件发布器
//!
//! 在数据库事务提交之后，以"发后不管"的方式把订单事件投递到 Kafka。
//! 发布失败只记录日志：订单/结算以数据库提交为准，事件投递是
//! 尽力而为的 at-least-once，不在一致性边界之内。

use restaurant_shared::events::OrderEvent;
use restaurant_shared::kafka::{KafkaProducer, topics};
use tracing::{info, warn};

/// 订单事件发布器
///
/// 对共享 KafkaProducer 的薄封装，固定 topic 与分区键的选取。
#[derive(Clone)]
pub struct OrderEventPublisher {
    producer: KafkaProducer,
}

impl OrderEventPublisher {
    pub fn new(producer: KafkaProducer) -> Self {
        Self { producer }
    }

    /// 异步发布订单事件，不阻塞调用方
    ///
    /// 在独立 task 中做单次尽力投递；分区键为订单 ID，
    /// 保证同一订单的事件在 broker 侧保持顺序。
    /// 任何失败（序列化、broker 不可达、超时）都在此处消化，
    /// 绝不回传给 HTTP 调用方。
    pub fn publish(&self, event: OrderEvent) {
        let producer = self.producer.clone();
        tokio::spawn(async move {
            let key = event.kafka_key();
            match producer.send_json(topics::ORDER_EVENTS, &key, &event).await {
                Ok((partition, offset)) => {
                    info!(
                        order_id = event.order_id,
                        status = %event.status,
                        partition,
                        offset,
                        "订单事件已发布"
                    );
                }
                Err(e) => {
                    warn!(
                        order_id = event.order_id,
                        status = %event.status,
                        error = %e,
                        "订单事件发布失败，已放弃（业务状态以数据库提交为准）"
                    );
                }
            }
        });
    }
}

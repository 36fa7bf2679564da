//! Kafka 消费者与事件分发
//!
//! 将 Kafka 消息解码为订单事件并交给 OrderEventProcessor。
//! 位点只在处理成功后提交（由 KafkaConsumer 负责），因此：
//! - 解析失败的毒消息跳过并提交，避免卡死分区；
//! - 落库失败返回 Err，位点不提交，等待 broker 重投递。

use tokio::sync::watch;
use tracing::{info, warn};

use restaurant_shared::config::KafkaConfig;
use restaurant_shared::error::RestaurantError;
use restaurant_shared::events::OrderEvent;
use restaurant_shared::kafka::{ConsumerMessage, KafkaConsumer, topics};

use crate::error::FeedbackError;
use crate::processor::OrderEventProcessor;

/// 订单事件消费者
///
/// 组合 KafkaConsumer（消息拉取）与 OrderEventProcessor（幂等落库），
/// 形成完整的消费管道。
pub struct FeedbackConsumer {
    consumer: KafkaConsumer,
    processor: OrderEventProcessor,
}

impl FeedbackConsumer {
    pub fn new(
        config: &KafkaConfig,
        processor: OrderEventProcessor,
    ) -> Result<Self, FeedbackError> {
        let consumer = KafkaConsumer::new(config)?;
        Ok(Self {
            consumer,
            processor,
        })
    }

    /// 启动消费循环，直到收到 shutdown 信号
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<(), FeedbackError> {
        self.consumer.subscribe(&[topics::ORDER_EVENTS])?;

        info!(topic = topics::ORDER_EVENTS, "订单事件消费者已启动");

        let processor = self.processor;

        self.consumer
            .start(shutdown, |msg| {
                let processor = &processor;
                async move { handle_message(processor, &msg).await }
            })
            .await;

        info!("订单事件消费者已停止");
        Ok(())
    }
}

/// 处理单条消息
///
/// 返回 Ok 表示位点可以提交：包括成功应用的事件，以及无法解析的
/// 毒消息（重投递也不会成功，跳过并记录）。只有落库失败才返回 Err。
async fn handle_message(
    processor: &OrderEventProcessor,
    msg: &ConsumerMessage,
) -> Result<(), RestaurantError> {
    let event: OrderEvent = match msg.deserialize_payload() {
        Ok(event) => event,
        Err(e) => {
            warn!(
                error = %e,
                topic = %msg.topic,
                partition = msg.partition,
                offset = msg.offset,
                "订单事件解析失败，跳过该消息"
            );
            return Ok(());
        }
    };

    info!(
        order_id = event.order_id,
        status = %event.status,
        partition = msg.partition,
        offset = msg.offset,
        "收到订单事件"
    );

    processor.apply(&event).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use restaurant_shared::events::{OrderEventItem, OrderStatus};
    use rust_decimal::Decimal;

    fn message_with_payload(payload: Vec<u8>) -> ConsumerMessage {
        ConsumerMessage {
            topic: topics::ORDER_EVENTS.to_string(),
            partition: 0,
            offset: 1,
            key: Some("1".to_string()),
            payload,
            timestamp: None,
        }
    }

    /// 毒消息必须能被识别为不可恢复，交由调用方跳过
    #[test]
    fn test_poison_payload_fails_deserialization() {
        let msg = message_with_payload(b"not json at all".to_vec());
        assert!(msg.deserialize_payload::<OrderEvent>().is_err());
    }

    #[test]
    fn test_valid_event_deserializes() {
        let event = OrderEvent::new(
            7,
            3,
            Decimal::new(2000, 2),
            OrderStatus::Completed,
            vec![OrderEventItem {
                food_item_id: 1,
                name: "Naan".to_string(),
                quantity: 2,
            }],
        );
        let msg = message_with_payload(serde_json::to_vec(&event).unwrap());

        let parsed: OrderEvent = msg.deserialize_payload().unwrap();
        assert_eq!(parsed.order_id, 7);
        assert!(parsed.is_completed());
    }
}

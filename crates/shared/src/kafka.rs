//! Kafka 基础设施封装
//!
//! 将 rdkafka 的底层 API 封装为业务友好的 Producer/Consumer 抽象，
//! 统一消息序列化、错误映射和优雅关闭语义。
//!
//! 消费侧关闭了自动提交：只有 handler 返回 Ok 才提交位点，
//! 处理失败的消息在重启或重平衡后由 broker 重新投递，
//! 因此 handler 的副作用必须是幂等的。

use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message};
use rdkafka::producer::{FutureProducer, FutureRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::KafkaConfig;
use crate::error::RestaurantError;

// ---------------------------------------------------------------------------
// Topic 常量
// ---------------------------------------------------------------------------

/// 集中管理 Kafka topic 名称，防止字符串散落在各服务中导致拼写不一致
pub mod topics {
    /// 订单事件通道，生产方与所有消费方共享的固定逻辑通道
    pub const ORDER_EVENTS: &str = "orders";
}

// ---------------------------------------------------------------------------
// ConsumerMessage
// ---------------------------------------------------------------------------

/// 消费到的 Kafka 消息的统一表示
///
/// 将 rdkafka 的 `BorrowedMessage`（带生命周期约束）转换为拥有所有权的结构体，
/// 使消息可以安全地跨 await 点传递给异步处理函数。
#[derive(Debug, Clone)]
pub struct ConsumerMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<String>,
    pub payload: Vec<u8>,
    pub timestamp: Option<i64>,
}

impl ConsumerMessage {
    /// 从 rdkafka 的借用消息构造，提取并拥有所有字段
    fn from_borrowed(msg: &BorrowedMessage<'_>) -> Self {
        let key = msg
            .key()
            .and_then(|k| std::str::from_utf8(k).ok())
            .map(String::from);

        let payload = msg.payload().map(|p| p.to_vec()).unwrap_or_default();

        Self {
            topic: msg.topic().to_string(),
            partition: msg.partition(),
            offset: msg.offset(),
            key,
            payload,
            timestamp: msg.timestamp().to_millis(),
        }
    }

    /// 将 JSON 格式负载反序列化为目标类型
    pub fn deserialize_payload<T: DeserializeOwned>(&self) -> Result<T, RestaurantError> {
        serde_json::from_slice(&self.payload)
            .map_err(|e| RestaurantError::Kafka(format!("负载反序列化失败: {e}")))
    }
}

// ---------------------------------------------------------------------------
// KafkaProducer
// ---------------------------------------------------------------------------

/// 面向业务的 Kafka 生产者
///
/// 封装 `FutureProducer` 并提供类型安全的 JSON 发送方法，
/// 内部已派生 Clone（`FutureProducer` 本身是 Arc 包装的）。
#[derive(Clone)]
pub struct KafkaProducer {
    producer: FutureProducer,
}

impl KafkaProducer {
    /// 根据配置创建生产者
    ///
    /// `message.timeout.ms` 设为 5 秒：发布路径是单次尽力投递，
    /// 超时后由调用方记录日志放弃，不做同步重试。
    pub fn new(config: &KafkaConfig) -> Result<Self, RestaurantError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| RestaurantError::Kafka(format!("创建生产者失败: {e}")))?;

        info!(brokers = %config.brokers, "Kafka 生产者已初始化");
        Ok(Self { producer })
    }

    /// 发送原始字节消息
    pub async fn send(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(i32, i64), RestaurantError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);

        let delivery = self
            .producer
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(e, _)| RestaurantError::Kafka(format!("发送消息失败: {e}")))?;

        debug!(
            topic,
            key,
            partition = delivery.partition,
            offset = delivery.offset,
            "消息已发送"
        );
        Ok((delivery.partition, delivery.offset))
    }

    /// 将值序列化为 JSON 后发送
    ///
    /// 序列化与网络发送拆分为两步，便于独立定位故障原因。
    pub async fn send_json<T: Serialize>(
        &self,
        topic: &str,
        key: &str,
        value: &T,
    ) -> Result<(i32, i64), RestaurantError> {
        let payload = serde_json::to_vec(value)
            .map_err(|e| RestaurantError::Kafka(format!("序列化失败: {e}")))?;

        self.send(topic, key, &payload).await
    }
}

// ---------------------------------------------------------------------------
// KafkaConsumer
// ---------------------------------------------------------------------------

/// 面向业务的 Kafka 消费者
///
/// 封装 `StreamConsumer`，提供基于 `watch` channel 的优雅关闭语义，
/// 以及"先处理、后提交"的位点管理。
pub struct KafkaConsumer {
    consumer: StreamConsumer,
}

impl KafkaConsumer {
    /// 创建消费者
    ///
    /// 自动提交被禁用：位点只在消息处理成功后提交，未提交的消息
    /// 会在重启或下一次分区分配时被重新投递。
    pub fn new(config: &KafkaConfig) -> Result<Self, RestaurantError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.consumer_group)
            .set("auto.offset.reset", &config.auto_offset_reset)
            .set("enable.auto.commit", "false")
            .create()
            .map_err(|e| RestaurantError::Kafka(format!("创建消费者失败: {e}")))?;

        info!(
            brokers = %config.brokers,
            group_id = %config.consumer_group,
            "Kafka 消费者已初始化"
        );
        Ok(Self { consumer })
    }

    /// 订阅指定的 topic 列表
    pub fn subscribe(&self, topics: &[&str]) -> Result<(), RestaurantError> {
        self.consumer
            .subscribe(topics)
            .map_err(|e| RestaurantError::Kafka(format!("订阅 topic 失败: {e}")))?;

        info!(?topics, "已订阅 Kafka topics");
        Ok(())
    }

    /// 启动消费循环
    ///
    /// 使用 `tokio::select!` 同时监听消息流和关闭信号：
    /// - handler 返回 Ok 时异步提交该消息的位点；
    /// - handler 返回 Err 时只记录日志、不提交位点，让 broker 的
    ///   重投递策略负责重试，循环本身不会因单条消息失败而中断；
    /// - 关闭信号变为 `true` 时退出循环，正在执行的 handler 自然完成。
    pub async fn start<F, Fut>(self, mut shutdown: watch::Receiver<bool>, handler: F)
    where
        F: Fn(ConsumerMessage) -> Fut,
        Fut: std::future::Future<Output = Result<(), RestaurantError>>,
    {
        use futures::StreamExt;

        let stream = self.consumer.stream();
        futures::pin_mut!(stream);

        info!("Kafka 消费循环已启动");

        loop {
            tokio::select! {
                // 偏向关闭信号，保证收到关闭时能尽快退出
                biased;

                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("收到关闭信号，Kafka 消费循环退出");
                        break;
                    }
                }

                msg_result = stream.next() => {
                    let Some(msg_result) = msg_result else {
                        warn!("Kafka 消息流意外结束");
                        break;
                    };

                    match msg_result {
                        Ok(borrowed_msg) => {
                            let msg = ConsumerMessage::from_borrowed(&borrowed_msg);
                            debug!(
                                topic = %msg.topic,
                                partition = msg.partition,
                                offset = msg.offset,
                                "收到 Kafka 消息"
                            );

                            match handler(msg).await {
                                Ok(()) => {
                                    if let Err(e) = self
                                        .consumer
                                        .commit_message(&borrowed_msg, CommitMode::Async)
                                    {
                                        warn!(error = %e, "提交位点失败，消息可能被重复投递");
                                    }
                                }
                                Err(e) => {
                                    // 不提交位点，等待 broker 重投递
                                    error!(
                                        error = %e,
                                        partition = borrowed_msg.partition(),
                                        offset = borrowed_msg.offset(),
                                        "处理 Kafka 消息失败，位点未提交"
                                    );
                                }
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "接收 Kafka 消息出错");
                        }
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 测试
// ---------------------------------------------------------------------------

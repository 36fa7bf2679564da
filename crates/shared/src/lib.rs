//! 共享库
//!
//! 包含点餐服务与反馈服务共用的配置、错误处理、数据库连接、
//! Kafka 生产/消费封装以及订单事件模型。

pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod kafka;
pub mod observability;

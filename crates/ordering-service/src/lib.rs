//! 点餐服务
//!
//! 负责菜品目录、订单下单与结算的事务性处理，并在订单状态变化后
//! 以"发后不管"的方式向 Kafka 发布订单事件。
//! 库存安全由结算事务内的条件扣减语句保证。

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod publisher;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

//! 用户反馈服务
//!
//! 消费点餐服务发布的订单事件，按至少一次语义幂等落库，
//! 并提供订单反馈的增删改查与统计 REST API。

pub mod auth;
pub mod consumer;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod processor;
pub mod repository;
pub mod routes;
pub mod state;

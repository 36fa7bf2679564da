//! 服务层
//!
//! 承载点餐域的业务逻辑，事务性 SQL 与事务边界放在同一处。
//!
//! ## 模块结构
//!
//! - `order_service`: 下单与结算的两阶段事务

pub mod order_service;

pub use order_service::OrderService;

//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::auth::JwtManager;
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// Axum 应用共享状态
///
/// 通过 Clone 在 handler 间共享，内部组件各自持有连接池句柄。
#[derive(Clone)]
pub struct AppState {
    pub repository: OrderRepository,
    pub order_service: OrderService,
    pub jwt_manager: Arc<JwtManager>,
}

impl AppState {
    pub fn new(
        repository: OrderRepository,
        order_service: OrderService,
        jwt_manager: Arc<JwtManager>,
    ) -> Self {
        Self {
            repository,
            order_service,
            jwt_manager,
        }
    }
}

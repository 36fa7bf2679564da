//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 公开路由（无需认证）
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(handlers::auth::login))
        .route("/food-items", get(handlers::food_item::list_food_items))
}

/// 受保护路由（需要 Bearer Token）
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::profile::get_profile))
        .route("/orders", post(handlers::order::place_order))
        .route("/transactions", post(handlers::transaction::settle_order))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// 构建完整的 API 路由
pub fn api_routes(state: AppState) -> Router<AppState> {
    public_routes().merge(protected_routes(state))
}

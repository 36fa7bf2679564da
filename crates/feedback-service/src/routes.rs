//! 路由配置模块

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 公开路由（无需认证）
fn public_routes() -> Router<AppState> {
    Router::new().route("/auth", post(handlers::auth::login))
}

/// 受保护路由（需要 Bearer Token）
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // 静态路径先于参数路径注册，避免 /feedback/stats 被 {id} 吞掉
        .route("/feedback/stats", get(handlers::feedback::feedback_stats))
        .route("/feedback", get(handlers::feedback::list_feedback))
        .route("/feedback", post(handlers::feedback::create_feedback))
        .route("/feedback/{id}", put(handlers::feedback::update_feedback))
        .route(
            "/feedback/{id}",
            delete(handlers::feedback::delete_feedback),
        )
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// 构建完整的 API 路由
pub fn api_routes(state: AppState) -> Router<AppState> {
    public_routes().merge(protected_routes(state))
}

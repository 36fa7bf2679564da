//! 点餐服务
//!
//! 提供登录、菜品查询、下单与结算的 REST API，
//! 并在订单状态变化后向 Kafka 发布订单事件。

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use ordering_service::{
    auth::JwtManager, publisher::OrderEventPublisher, repository::OrderRepository, routes,
    service::OrderService, state::AppState,
};
use restaurant_shared::{
    config::AppConfig, database::Database, kafka::KafkaProducer, observability,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("restaurant-ordering-service").unwrap_or_default();
    observability::init(&config.observability)?;

    info!("Starting ordering-service on {}", config.server_addr());

    let db = Database::connect(&config.database).await?;
    sqlx::migrate!("./migrations").run(db.pool()).await?;

    let producer = KafkaProducer::new(&config.kafka)?;
    let publisher = OrderEventPublisher::new(producer);

    let state = AppState::new(
        OrderRepository::new(db.clone()),
        OrderService::new(db.pool().clone(), publisher),
        Arc::new(JwtManager::new(&config.auth)),
    );

    let app = Router::new()
        .merge(routes::api_routes(state.clone()))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：停止接收新连接并等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

/// 存活探针：服务进程正常即返回 ok
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "ordering-service"
    }))
}

//! 用户反馈服务
//!
//! 同时运行两条路径：
//! - Kafka 消费循环：幂等落库订单事件；
//! - REST API：反馈的增删改查与统计。
//!
//! 两者共享一个关闭信号，HTTP 服务退出后通知消费循环收尾。

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use feedback_service::{
    auth::JwtManager, consumer::FeedbackConsumer, processor::OrderEventProcessor,
    repository::FeedbackRepository, routes, state::AppState,
};
use restaurant_shared::{config::AppConfig, database::Database, observability};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("restaurant-feedback-service").unwrap_or_default();
    observability::init(&config.observability)?;

    info!("Starting feedback-service on {}", config.server_addr());

    let db = Database::connect(&config.database).await?;
    sqlx::migrate!("./migrations").run(db.pool()).await?;

    // 关闭信号：HTTP 服务退出后通知消费循环
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let processor = OrderEventProcessor::new(db.pool().clone());
    let consumer = FeedbackConsumer::new(&config.kafka, processor)?;
    let consumer_handle = tokio::spawn(async move {
        if let Err(e) = consumer.run(shutdown_rx).await {
            warn!(error = %e, "订单事件消费者异常退出");
        }
    });

    let state = AppState::new(
        FeedbackRepository::new(db.clone()),
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

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // HTTP 已停止，通知消费循环退出并等待其收尾
    let _ = shutdown_tx.send(true);
    let _ = consumer_handle.await;

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
        "service": "feedback-service"
    }))
}

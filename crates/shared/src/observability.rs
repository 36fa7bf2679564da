//! 日志初始化模块
//!
//! 提供基于 tracing 的结构化日志初始化，所有服务通过单一入口点配置，
//! 确保一致的输出格式和过滤规则。

use anyhow::Result;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::ObservabilityConfig;

/// 初始化全局日志订阅器
///
/// 过滤级别优先读取 RUST_LOG 环境变量，未设置时退回配置文件中的
/// `log_level`。`log_format = "json"` 输出结构化日志供采集系统消费，
/// 其余值输出带颜色的人类可读格式。
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if config.log_format == "json" {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_ansi(true).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

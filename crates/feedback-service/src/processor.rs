//! 订单事件处理器
//!
//! 把 completed 订单事件落为本地用户记录。at-least-once 投递下
//! 同一事件可能被应用多次，写入必须幂等。

use sqlx::PgPool;
use tracing::{debug, info, instrument};

use restaurant_shared::error::Result;
use restaurant_shared::events::OrderEvent;

/// 订单事件处理器
///
/// 只关心 completed 事件：确保事件归属用户在本地存在，
/// 为后续的反馈提交建立外键前提。其他状态的事件记录日志后忽略。
#[derive(Clone)]
pub struct OrderEventProcessor {
    pool: PgPool,
}

impl OrderEventProcessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 应用一条订单事件
    ///
    /// ON CONFLICT DO NOTHING 保证重复投递不产生副作用：
    /// 应用两次与应用一次的数据库状态完全一致。
    /// 返回 Err 时调用方不提交位点，等待 broker 重投递。
    #[instrument(skip(self, event), fields(order_id = event.order_id, status = %event.status))]
    pub async fn apply(&self, event: &OrderEvent) -> Result<()> {
        if !event.is_completed() {
            debug!(
                order_id = event.order_id,
                status = %event.status,
                "非 completed 事件，跳过"
            );
            return Ok(());
        }

        // 事件不携带用户资料，用户名与邮箱用占位值生成
        let result = sqlx::query(
            "INSERT INTO users (id, username, email) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(event.user_id)
        .bind(format!("user-{}", event.user_id))
        .bind(format!("user-{}@restaurant.local", event.user_id))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(
                order_id = event.order_id,
                user_id = event.user_id,
                "订单事件已应用，用户记录已创建"
            );
        } else {
            debug!(
                order_id = event.order_id,
                user_id = event.user_id,
                "用户记录已存在，事件重复应用无副作用"
            );
        }

        Ok(())
    }
}

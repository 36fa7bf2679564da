//! 订单事务服务
//!
//! 订单生命周期的两个阶段各自对应一个数据库事务：
//!
//! 1. **下单（place_order）**：按下单时刻的单价冻结订单总价，
//!    创建 pending 订单及其条目。不触碰库存。
//! 2. **结算（settle_order）**：校验归属与状态后，对每个条目做
//!    条件库存扣减，全部成功才把订单置为 completed。任何一个
//!    条目库存不足则整个事务回滚，订单保持 pending。
//!
//! 事务提交之后发布对应的订单事件（发后不管），事件投递失败
//! 不影响已提交的业务状态。

use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use tracing::{info, instrument, warn};

use restaurant_shared::events::{OrderEvent, OrderEventItem, OrderStatus};

use crate::dto::{OrderItemRequest, PlaceOrderResponse};
use crate::error::{OrderError, Result};
use crate::models::Order;
use crate::publisher::OrderEventPublisher;

/// 下单阶段在事务内锁定的单条菜品信息
struct PricedLine {
    food_item_id: i64,
    name: String,
    unit_price: Decimal,
    quantity: i32,
}

/// 结算阶段从订单条目联表取出的行
#[derive(sqlx::FromRow)]
struct SettleLine {
    food_item_id: i64,
    name: String,
    quantity: i32,
}

/// 订单事务服务
///
/// 持有连接池与事件发布器。所有写路径都显式开启事务，
/// 事务内只做短查询与写入，不做任何网络调用。
#[derive(Clone)]
pub struct OrderService {
    pool: PgPool,
    publisher: OrderEventPublisher,
}

impl OrderService {
    pub fn new(pool: PgPool, publisher: OrderEventPublisher) -> Self {
        Self { pool, publisher }
    }

    /// 下单
    ///
    /// 单个事务内完成：逐条锁定菜品当前单价、累加 Decimal 总价、
    /// 写入订单与条目。任何一个菜品不存在则整体回滚，
    /// 不会产生部分订单。
    ///
    /// 提交后发布 pending 事件，条目名称取下单时刻的快照。
    #[instrument(skip(self, items), fields(user_id = user_id, line_count = items.len()))]
    pub async fn place_order(
        &self,
        user_id: i64,
        items: &[OrderItemRequest],
    ) -> Result<PlaceOrderResponse> {
        let mut tx = self.pool.begin().await?;

        // 逐条取当前单价与名称；名称在此刻快照，供事件使用
        let mut lines = Vec::with_capacity(items.len());
        let mut total_price = Decimal::ZERO;
        for item in items {
            let row = sqlx::query("SELECT name, price FROM food_items WHERE id = $1")
                .bind(item.food_item_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(OrderError::FoodItemNotFound(item.food_item_id))?;

            let name: String = row.get("name");
            let unit_price: Decimal = row.get("price");
            total_price += unit_price * Decimal::from(item.quantity);
            lines.push(PricedLine {
                food_item_id: item.food_item_id,
                name,
                unit_price,
                quantity: item.quantity,
            });
        }

        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (user_id, total_price, status) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(total_price)
        .bind(OrderStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                "INSERT INTO order_items (order_id, food_item_id, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(order_id)
            .bind(line.food_item_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(order_id, user_id, %total_price, "订单创建成功");

        let event_items = lines
            .iter()
            .map(|l| OrderEventItem {
                food_item_id: l.food_item_id,
                name: l.name.clone(),
                quantity: l.quantity,
            })
            .collect();
        self.publisher.publish(OrderEvent::new(
            order_id,
            user_id,
            total_price,
            OrderStatus::Pending,
            event_items,
        ));

        Ok(PlaceOrderResponse {
            order_id,
            total_price,
        })
    }

    /// 结算订单
    ///
    /// 单个事务内完成：锁定订单行、校验归属与 pending 状态、
    /// 对每个条目执行条件扣减（`quantity >= 需求量` 才生效）、
    /// 将订单置为 completed。任一条目扣减影响 0 行即库存不足，
    /// 整个事务回滚，已扣减的条目一并恢复。
    ///
    /// 提交后发布 completed 事件，条目名称取结算时刻的当前值。
    #[instrument(skip(self), fields(user_id = user_id, order_id = order_id))]
    pub async fn settle_order(&self, user_id: i64, order_id: i64) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        // FOR UPDATE 串行化对同一订单的并发结算
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, total_price, status, created_at \
             FROM orders WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::OrderNotFound(order_id))?;

        if order.user_id != user_id {
            return Err(OrderError::Forbidden);
        }
        if order.status != OrderStatus::Pending {
            return Err(OrderError::InvalidState {
                status: order.status,
            });
        }

        let lines = sqlx::query_as::<_, SettleLine>(
            "SELECT oi.food_item_id, fi.name, oi.quantity \
             FROM order_items oi \
             JOIN food_items fi ON fi.id = oi.food_item_id \
             WHERE oi.order_id = $1 \
             ORDER BY oi.id",
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;

        for line in &lines {
            let result = sqlx::query(
                "UPDATE food_items SET quantity = quantity - $1 \
                 WHERE id = $2 AND quantity >= $1",
            )
            .bind(line.quantity)
            .bind(line.food_item_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                warn!(
                    order_id,
                    food_item_id = line.food_item_id,
                    requested = line.quantity,
                    "库存不足，结算回滚"
                );
                return Err(OrderError::InsufficientStock {
                    food_item_id: line.food_item_id,
                    name: line.name.clone(),
                });
            }
        }

        sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(OrderStatus::Completed)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(order_id, user_id, total_price = %order.total_price, "订单结算成功");

        let event_items = lines
            .into_iter()
            .map(|l| OrderEventItem {
                food_item_id: l.food_item_id,
                name: l.name,
                quantity: l.quantity,
            })
            .collect();
        self.publisher.publish(OrderEvent::new(
            order_id,
            user_id,
            order.total_price,
            OrderStatus::Completed,
            event_items,
        ));

        Ok(Order {
            status: OrderStatus::Completed,
            ..order
        })
    }
}

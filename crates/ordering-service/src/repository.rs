//! 点餐服务数据访问层
//!
//! 只承载与事务无关的简单查询；下单与结算的事务性 SQL
//! 直接写在 service 层，和事务边界放在一起。

use restaurant_shared::database::Database;

use crate::error::{OrderError, Result};
use crate::models::{FoodItem, User};

#[derive(Clone)]
pub struct OrderRepository {
    db: Database,
}

impl OrderRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 按用户名查找用户（登录用）
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, email, address FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(user)
    }

    /// 按 ID 查找用户
    pub async fn find_user_by_id(&self, user_id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, email, address FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or(OrderError::UserNotFound(user_id))
    }

    /// 菜品列表（含当前价格与剩余库存）
    pub async fn list_food_items(&self) -> Result<Vec<FoodItem>> {
        let items = sqlx::query_as::<_, FoodItem>(
            "SELECT id, name, price, quantity FROM food_items ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(items)
    }
}

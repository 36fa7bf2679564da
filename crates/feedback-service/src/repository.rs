//! 反馈服务数据访问层

use restaurant_shared::database::Database;

use crate::dto::{FeedbackStats, RatingCount};
use crate::error::{FeedbackError, Result};
use crate::models::{Feedback, User};

#[derive(Clone)]
pub struct FeedbackRepository {
    db: Database,
}

impl FeedbackRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 按用户名查找用户（登录用）
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(user)
    }

    /// 当前用户的全部反馈，按创建时间倒序
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Feedback>> {
        let feedbacks = sqlx::query_as::<_, Feedback>(
            "SELECT id, order_id, user_id, rating, comment, created_at, updated_at \
             FROM feedbacks WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(feedbacks)
    }

    /// 创建反馈
    ///
    /// (order_id, user_id) 的唯一约束兜底并发下的重复提交，
    /// 唯一键冲突映射为 DuplicateFeedback。
    pub async fn create(
        &self,
        user_id: i64,
        order_id: i64,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<Feedback> {
        let result = sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedbacks (order_id, user_id, rating, comment) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, order_id, user_id, rating, comment, created_at, updated_at",
        )
        .bind(order_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(self.db.pool())
        .await;

        match result {
            Ok(feedback) => Ok(feedback),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(FeedbackError::DuplicateFeedback { order_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 更新反馈，只有归属用户可以更新，省略的字段保持原值
    pub async fn update(
        &self,
        user_id: i64,
        feedback_id: i64,
        rating: Option<i16>,
        comment: Option<&str>,
    ) -> Result<Feedback> {
        sqlx::query_as::<_, Feedback>(
            "UPDATE feedbacks \
             SET rating = COALESCE($3, rating), \
                 comment = COALESCE($4, comment), \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING id, order_id, user_id, rating, comment, created_at, updated_at",
        )
        .bind(feedback_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or(FeedbackError::FeedbackNotFound(feedback_id))
    }

    /// 删除反馈，只有归属用户可以删除
    pub async fn delete(&self, user_id: i64, feedback_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = $1 AND user_id = $2")
            .bind(feedback_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(FeedbackError::FeedbackNotFound(feedback_id));
        }
        Ok(())
    }

    /// 全局反馈统计：总数、平均分、各评分档位数量
    pub async fn stats(&self) -> Result<FeedbackStats> {
        let (total_feedback, average_rating): (i64, f64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(AVG(rating), 0)::float8 FROM feedbacks",
        )
        .fetch_one(self.db.pool())
        .await?;

        // 固定输出 1-5 五个档位，缺失的档位计数为 0
        let rating_counts = sqlx::query_as::<_, RatingCount>(
            "SELECT r.rating::smallint AS rating, COUNT(f.id) AS count \
             FROM generate_series(1, 5) AS r (rating) \
             LEFT JOIN feedbacks f ON f.rating = r.rating \
             GROUP BY r.rating ORDER BY r.rating",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(FeedbackStats {
            total_feedback,
            average_rating,
            rating_counts,
        })
    }
}

//! 订单事件落库与反馈仓储集成测试
//!
//! 使用真实 PostgreSQL 覆盖 at-least-once 语义下的幂等应用，
//! 以及反馈唯一约束的冲突映射。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test event_apply_test -- --ignored
//! ```

use rust_decimal::Decimal;
use sqlx::PgPool;

use feedback_service::error::FeedbackError;
use feedback_service::processor::OrderEventProcessor;
use feedback_service::repository::FeedbackRepository;
use restaurant_shared::database::Database;
use restaurant_shared::events::{OrderEvent, OrderEventItem, OrderStatus};

// ==================== 辅助函数 ====================

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

async fn setup(pool: &PgPool) -> OrderEventProcessor {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .expect("运行迁移失败");
    OrderEventProcessor::new(pool.clone())
}

fn completed_event(order_id: i64, user_id: i64) -> OrderEvent {
    OrderEvent::new(
        order_id,
        user_id,
        Decimal::new(3000, 2),
        OrderStatus::Completed,
        vec![OrderEventItem {
            food_item_id: 1,
            name: "Biryani".to_string(),
            quantity: 3,
        }],
    )
}

async fn user_count(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("查询用户失败")
}

async fn cleanup_user(pool: &PgPool, user_id: i64) {
    sqlx::query("DELETE FROM feedbacks WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("清理反馈失败");
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("清理用户失败");
}

// ==================== 事件应用 ====================

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_completed_event_creates_user() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let processor = setup(&pool).await;
    let user_id = 910_001;
    cleanup_user(&pool, user_id).await;

    processor.apply(&completed_event(1, user_id)).await.unwrap();

    assert_eq!(user_count(&pool, user_id).await, 1);
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_apply_twice_equals_apply_once() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let processor = setup(&pool).await;
    let user_id = 910_002;
    cleanup_user(&pool, user_id).await;

    let event = completed_event(2, user_id);
    processor.apply(&event).await.unwrap();
    let username_after_first: String =
        sqlx::query_scalar("SELECT username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    // 重复投递：第二次应用不报错、不产生额外行、不改写已有行
    processor.apply(&event).await.unwrap();

    assert_eq!(user_count(&pool, user_id).await, 1);
    let username_after_second: String =
        sqlx::query_scalar("SELECT username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(username_after_first, username_after_second);
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_pending_event_is_ignored() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let processor = setup(&pool).await;
    let user_id = 910_003;
    cleanup_user(&pool, user_id).await;

    let event = OrderEvent::new(
        3,
        user_id,
        Decimal::new(1000, 2),
        OrderStatus::Pending,
        vec![],
    );
    processor.apply(&event).await.unwrap();

    // 非 completed 事件不落库
    assert_eq!(user_count(&pool, user_id).await, 0);
}

// ==================== 反馈仓储 ====================

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_duplicate_feedback_mapped_to_conflict() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let processor = setup(&pool).await;
    let user_id = 910_004;
    let order_id = 940_004;
    cleanup_user(&pool, user_id).await;
    processor
        .apply(&completed_event(order_id, user_id))
        .await
        .unwrap();

    let repo = FeedbackRepository::new(Database::from_pool(pool.clone()));

    repo.create(user_id, order_id, 5, Some("好吃")).await.unwrap();
    let err = repo.create(user_id, order_id, 4, None).await.unwrap_err();

    assert!(matches!(
        err,
        FeedbackError::DuplicateFeedback { order_id: o } if o == order_id
    ));
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_update_and_delete_scoped_to_owner() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let processor = setup(&pool).await;
    let owner_id = 910_005;
    let other_id = 910_006;
    let order_id = 940_005;
    cleanup_user(&pool, owner_id).await;
    cleanup_user(&pool, other_id).await;
    processor
        .apply(&completed_event(order_id, owner_id))
        .await
        .unwrap();
    processor
        .apply(&completed_event(order_id + 1, other_id))
        .await
        .unwrap();

    let repo = FeedbackRepository::new(Database::from_pool(pool.clone()));
    let feedback = repo.create(owner_id, order_id, 3, None).await.unwrap();

    // 非归属用户操作他人反馈等同于反馈不存在
    let err = repo
        .update(other_id, feedback.id, Some(1), None)
        .await
        .unwrap_err();
    assert!(matches!(err, FeedbackError::FeedbackNotFound(_)));

    let err = repo.delete(other_id, feedback.id).await.unwrap_err();
    assert!(matches!(err, FeedbackError::FeedbackNotFound(_)));

    // 归属用户可以正常更新与删除
    let updated = repo
        .update(owner_id, feedback.id, Some(5), Some("更新后"))
        .await
        .unwrap();
    assert_eq!(updated.rating, 5);
    repo.delete(owner_id, feedback.id).await.unwrap();
}

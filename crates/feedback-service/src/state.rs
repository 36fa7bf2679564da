//! 应用状态定义

use std::sync::Arc;

use crate::auth::JwtManager;
use crate::repository::FeedbackRepository;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub repository: FeedbackRepository,
    pub jwt_manager: Arc<JwtManager>,
}

impl AppState {
    pub fn new(repository: FeedbackRepository, jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            repository,
            jwt_manager,
        }
    }
}

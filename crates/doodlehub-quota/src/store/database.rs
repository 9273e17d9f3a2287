//! User counter store backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use doodlehub_core::result::AppResult;
use doodlehub_database::repositories::user::UserRepository;

use super::{DailyCounter, UserCounterStore};

/// Persists registered users' daily counters on the user row.
#[derive(Debug, Clone)]
pub struct DbUserCounterStore {
    users: Arc<UserRepository>,
}

impl DbUserCounterStore {
    /// Create a store over the user repository.
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserCounterStore for DbUserCounterStore {
    async fn load(&self, user_id: Uuid) -> AppResult<DailyCounter> {
        let counter = self.users.generation_counter(user_id).await?;
        Ok(DailyCounter {
            count: counter.generation_count.max(0) as u32,
            day: counter.generation_count_date,
        })
    }

    async fn reset(&self, user_id: Uuid, today: NaiveDate) -> AppResult<()> {
        self.users.reset_generation_counter(user_id, today).await
    }

    async fn increment(&self, user_id: Uuid, today: NaiveDate) -> AppResult<u32> {
        let count = self
            .users
            .increment_generation_counter(user_id, today)
            .await?;
        Ok(count.max(0) as u32)
    }
}

//! Counter store abstractions backing the quota policy.
//!
//! The guest counter was a hidden process-global map in earlier iterations
//! of this product; here it is an injected, interface-bound store so tests
//! run against memory and production can share a cache.

pub mod cached;
pub mod database;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use doodlehub_core::result::AppResult;

pub use cached::CachedGuestStore;
pub use database::DbUserCounterStore;
pub use memory::{MemoryGuestStore, MemoryUserCounterStore};

/// Usage record for one guest key within its rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestUsage {
    /// Generations committed in the current window.
    pub count: u32,
    /// When the current window opened.
    pub window_start: DateTime<Utc>,
}

impl GuestUsage {
    /// A fresh window opening now.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }
}

/// Daily counter slice of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCounter {
    /// Generations recorded for `day`.
    pub count: u32,
    /// The calendar day the count belongs to; `None` until first use.
    pub day: Option<NaiveDate>,
}

/// Store for guest usage records, keyed by caller key.
///
/// Implementations are free to garbage-collect entries after the window
/// TTL; correctness relies only on `window_start`.
#[async_trait]
pub trait GuestCounterStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load the usage record for a key, if any.
    async fn load(&self, key: &str) -> AppResult<Option<GuestUsage>>;

    /// Persist the usage record for a key.
    async fn save(&self, key: &str, usage: &GuestUsage, ttl: Duration) -> AppResult<()>;
}

/// Store for registered users' daily generation counters.
#[async_trait]
pub trait UserCounterStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load the user's daily counter.
    async fn load(&self, user_id: Uuid) -> AppResult<DailyCounter>;

    /// Reset the counter to zero for a new calendar day.
    async fn reset(&self, user_id: Uuid, today: NaiveDate) -> AppResult<()>;

    /// Atomically add one generation and stamp the day.
    /// Returns the counter value after the increment.
    async fn increment(&self, user_id: Uuid, today: NaiveDate) -> AppResult<u32>;
}

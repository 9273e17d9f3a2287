//! In-process counter stores.
//!
//! The guest store is explicitly volatile: counters are lost on process
//! restart. Suitable for single-node deployments and tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;

use super::{DailyCounter, GuestCounterStore, GuestUsage, UserCounterStore};

/// Guest counter store backed by an in-process map.
#[derive(Debug, Default)]
pub struct MemoryGuestStore {
    entries: DashMap<String, GuestUsage>,
}

impl MemoryGuestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestCounterStore for MemoryGuestStore {
    async fn load(&self, key: &str) -> AppResult<Option<GuestUsage>> {
        Ok(self.entries.get(key).map(|e| *e.value()))
    }

    async fn save(&self, key: &str, usage: &GuestUsage, _ttl: Duration) -> AppResult<()> {
        // The TTL is ignored here; window_start carries the semantics.
        self.entries.insert(key.to_string(), *usage);
        Ok(())
    }
}

/// User counter store backed by an in-process map, for tests and tools
/// that run without a database.
#[derive(Debug, Default)]
pub struct MemoryUserCounterStore {
    counters: DashMap<Uuid, DailyCounter>,
}

impl MemoryUserCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user's counter (test setup).
    pub fn seed(&self, user_id: Uuid, count: u32, day: Option<NaiveDate>) {
        self.counters.insert(user_id, DailyCounter { count, day });
    }

    /// Read a user's counter without going through the trait.
    pub fn snapshot(&self, user_id: Uuid) -> Option<DailyCounter> {
        self.counters.get(&user_id).map(|e| *e.value())
    }
}

#[async_trait]
impl UserCounterStore for MemoryUserCounterStore {
    async fn load(&self, user_id: Uuid) -> AppResult<DailyCounter> {
        self.counters
            .get(&user_id)
            .map(|e| *e.value())
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn reset(&self, user_id: Uuid, today: NaiveDate) -> AppResult<()> {
        let mut entry = self
            .counters
            .get_mut(&user_id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        *entry.value_mut() = DailyCounter {
            count: 0,
            day: Some(today),
        };
        Ok(())
    }

    async fn increment(&self, user_id: Uuid, today: NaiveDate) -> AppResult<u32> {
        let mut entry = self
            .counters
            .get_mut(&user_id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let counter = entry.value_mut();
        counter.count += 1;
        counter.day = Some(today);
        Ok(counter.count)
    }
}

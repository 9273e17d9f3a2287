//! Guest counter store backed by a shared cache.
//!
//! Serializes [`GuestUsage`] records as JSON into any
//! [`CacheProvider`], so multiple server processes see one counter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use doodlehub_cache::keys;
use doodlehub_core::result::AppResult;
use doodlehub_core::traits::cache::CacheProvider;

use super::{GuestCounterStore, GuestUsage};

/// Cache-backed guest counter store.
#[derive(Debug, Clone)]
pub struct CachedGuestStore {
    cache: Arc<dyn CacheProvider>,
}

impl CachedGuestStore {
    /// Create a store over the given cache provider.
    pub fn new(cache: Arc<dyn CacheProvider>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl GuestCounterStore for CachedGuestStore {
    async fn load(&self, key: &str) -> AppResult<Option<GuestUsage>> {
        let cache_key = keys::guest_counter(key);
        match self.cache.get(&cache_key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, usage: &GuestUsage, ttl: Duration) -> AppResult<()> {
        let cache_key = keys::guest_counter(key);
        let raw = serde_json::to_string(usage)?;
        self.cache.set(&cache_key, &raw, ttl).await
    }
}

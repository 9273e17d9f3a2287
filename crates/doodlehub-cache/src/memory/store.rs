//! In-memory cache implementation using the moka crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use doodlehub_core::config::cache::MemoryCacheConfig;
use doodlehub_core::result::AppResult;
use doodlehub_core::traits::cache::CacheProvider;

/// A cached value together with the TTL it was stored with.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Per-entry expiration policy driven by the TTL stored in each [`Entry`].
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Counters live in a separate dashmap so incr is atomic; counter keys do
/// not expire in this backend.
#[derive(Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
    /// Counters stored separately for atomic incr.
    counters: Arc<dashmap::DashMap<String, AtomicI64>>,
}

impl std::fmt::Debug for MemoryCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheProvider")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self {
            cache,
            counters: Arc::new(dashmap::DashMap::new()),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(counter) = self.counters.get(key) {
            return Ok(Some(counter.load(Ordering::SeqCst).to_string()));
        }
        Ok(self.cache.get(key).await.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        self.counters.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.counters.contains_key(key) || self.cache.contains_key(key))
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        // moka has no native set-if-not-exists; get-then-insert is
        // acceptable for single-node in-memory use.
        if self.cache.contains_key(key) {
            return Ok(false);
        }
        self.set(key, value, ttl).await?;
        Ok(true)
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        let entry = self
            .counters
            .entry(key.to_string())
            .or_insert_with(|| AtomicI64::new(0));
        Ok(entry.value().fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        // Re-insert with the new TTL; the expiry policy picks it up.
        if let Some(entry) = self.cache.get(key).await {
            self.cache
                .insert(
                    key.to_string(),
                    Entry {
                        value: entry.value,
                        ttl,
                    },
                )
                .await;
            return Ok(true);
        }
        Ok(self.counters.contains_key(key))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig::default())
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let cache = provider();
        cache
            .set("k", "v", Duration::from_secs(60))
            .await
            .expect("set");
        assert_eq!(cache.get("k").await.expect("get"), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_set_nx_respects_existing() {
        let cache = provider();
        assert!(cache.set_nx("k", "a", Duration::from_secs(60)).await.unwrap());
        assert!(!cache.set_nx("k", "b", Duration::from_secs(60)).await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), Some("a".to_string()));
    }

    #[tokio::test]
    async fn test_incr_is_sequential() {
        let cache = provider();
        assert_eq!(cache.incr("n").await.unwrap(), 1);
        assert_eq!(cache.incr("n").await.unwrap(), 2);
        assert_eq!(cache.get("n").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_delete_clears_counters() {
        let cache = provider();
        cache.incr("n").await.unwrap();
        cache.delete("n").await.unwrap();
        assert_eq!(cache.get("n").await.unwrap(), None);
    }
}

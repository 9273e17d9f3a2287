//! The quota policy: per-request eligibility and post-success charging.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use doodlehub_core::config::quota::QuotaConfig;
use doodlehub_core::result::AppResult;

use crate::decision::{Decision, DenyReason};
use crate::identity::CallerIdentity;
use crate::store::{GuestCounterStore, GuestUsage, UserCounterStore};

/// Gates each generation request by caller identity.
///
/// Invariants:
/// - a denied decision never mutates counter state;
/// - counters are only ever decremented by the reset transitions
///   (window rollover for guests, calendar-day change for free users);
/// - [`commit`](Self::commit) is called once per *successful* generation,
///   never before the generation call.
#[derive(Debug, Clone)]
pub struct QuotaPolicy {
    guests: Arc<dyn GuestCounterStore>,
    users: Arc<dyn UserCounterStore>,
    config: QuotaConfig,
}

impl QuotaPolicy {
    /// Create a policy over the given stores.
    pub fn new(
        guests: Arc<dyn GuestCounterStore>,
        users: Arc<dyn UserCounterStore>,
        config: QuotaConfig,
    ) -> Self {
        Self {
            guests,
            users,
            config,
        }
    }

    /// The active quota configuration.
    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    /// Length of the guest rolling window.
    fn guest_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.config.guest_window_hours as i64)
    }

    /// TTL used when persisting guest records. Garbage collection only;
    /// correctness relies on `window_start`.
    fn guest_ttl(&self) -> Duration {
        Duration::from_secs(self.config.guest_window_hours as u64 * 3600)
    }

    /// Decide whether a generation is permitted for this caller right now.
    pub async fn evaluate(
        &self,
        identity: &CallerIdentity,
        now: DateTime<Utc>,
    ) -> AppResult<Decision> {
        match identity {
            CallerIdentity::Guest { key } => self.evaluate_guest(key, now).await,
            CallerIdentity::Registered { plan, .. } if plan.is_premium() => {
                Ok(Decision::Allowed { remaining: None })
            }
            CallerIdentity::Registered { user_id, .. } => self.evaluate_free(*user_id, now).await,
        }
    }

    /// Charge one generation to this caller. Call only after the
    /// generation succeeded. Returns the residual quota, if bounded.
    pub async fn commit(
        &self,
        identity: &CallerIdentity,
        now: DateTime<Utc>,
    ) -> AppResult<Option<u32>> {
        match identity {
            CallerIdentity::Guest { key } => {
                let mut usage = self
                    .guests
                    .load(key)
                    .await?
                    .unwrap_or_else(|| GuestUsage::fresh(now));
                usage.count += 1;
                self.guests.save(key, &usage, self.guest_ttl()).await?;
                debug!(key = %key, count = usage.count, "Guest generation committed");
                Ok(Some(self.config.guest_limit.saturating_sub(usage.count)))
            }
            CallerIdentity::Registered { plan, .. } if plan.is_premium() => Ok(None),
            CallerIdentity::Registered { user_id, .. } => {
                let count = self.users.increment(*user_id, now.date_naive()).await?;
                debug!(user_id = %user_id, count, "Free-plan generation committed");
                Ok(Some(self.config.free_daily_limit.saturating_sub(count)))
            }
        }
    }

    /// Guest path: rolling window keyed by the caller-supplied key.
    async fn evaluate_guest(&self, key: &str, now: DateTime<Utc>) -> AppResult<Decision> {
        let usage = match self.guests.load(key).await? {
            Some(existing) if now - existing.window_start > self.guest_window() => {
                // Window rolled over; open a fresh one.
                let fresh = GuestUsage::fresh(now);
                self.guests.save(key, &fresh, self.guest_ttl()).await?;
                fresh
            }
            Some(existing) => existing,
            None => {
                let fresh = GuestUsage::fresh(now);
                self.guests.save(key, &fresh, self.guest_ttl()).await?;
                fresh
            }
        };

        if usage.count >= self.config.guest_limit {
            return Ok(Decision::Denied {
                reason: DenyReason::GuestLimitReached,
            });
        }

        Ok(Decision::Allowed {
            remaining: Some(self.config.guest_limit - usage.count),
        })
    }

    /// Free-plan path: calendar-day counter on the user row.
    ///
    /// The day comparison is against the server clock's date, not a
    /// rolling window; the guest path uses the opposite semantics.
    async fn evaluate_free(&self, user_id: uuid::Uuid, now: DateTime<Utc>) -> AppResult<Decision> {
        let today = now.date_naive();
        let mut counter = self.users.load(user_id).await?;

        if counter.day != Some(today) {
            // New calendar day: reset before evaluating.
            self.users.reset(user_id, today).await?;
            counter.count = 0;
            counter.day = Some(today);
        }

        if counter.count >= self.config.free_daily_limit {
            return Ok(Decision::Denied {
                reason: DenyReason::DailyLimitReached,
            });
        }

        Ok(Decision::Allowed {
            remaining: Some(self.config.free_daily_limit - counter.count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryGuestStore, MemoryUserCounterStore};
    use doodlehub_entity::user::UserPlan;
    use uuid::Uuid;

    fn policy() -> (Arc<MemoryGuestStore>, Arc<MemoryUserCounterStore>, QuotaPolicy) {
        let guests = Arc::new(MemoryGuestStore::new());
        let users = Arc::new(MemoryUserCounterStore::new());
        let policy = QuotaPolicy::new(guests.clone(), users.clone(), QuotaConfig::default());
        (guests, users, policy)
    }

    #[tokio::test]
    async fn test_guest_limit_then_denied() {
        let (_, _, policy) = policy();
        let identity = CallerIdentity::guest("203.0.113.9");
        let now = Utc::now();

        for _ in 0..3 {
            let decision = policy.evaluate(&identity, now).await.unwrap();
            assert!(decision.is_allowed());
            policy.commit(&identity, now).await.unwrap();
        }

        let decision = policy.evaluate(&identity, now).await.unwrap();
        assert_eq!(
            decision,
            Decision::Denied {
                reason: DenyReason::GuestLimitReached
            }
        );
    }

    #[tokio::test]
    async fn test_denial_does_not_mutate_guest_counter() {
        let (guests, _, policy) = policy();
        let identity = CallerIdentity::guest("203.0.113.9");
        let now = Utc::now();

        for _ in 0..3 {
            policy.evaluate(&identity, now).await.unwrap();
            policy.commit(&identity, now).await.unwrap();
        }
        let before = guests.load("203.0.113.9").await.unwrap().unwrap();

        // Two denied evaluations in a row leave the record untouched.
        for _ in 0..2 {
            let decision = policy.evaluate(&identity, now).await.unwrap();
            assert!(!decision.is_allowed());
        }
        let after = guests.load("203.0.113.9").await.unwrap().unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_guest_window_rolls_over() {
        let (guests, _, policy) = policy();
        let identity = CallerIdentity::guest("198.51.100.4");
        let now = Utc::now();

        let stale = GuestUsage {
            count: 3,
            window_start: now - chrono::Duration::hours(25),
        };
        guests
            .save("198.51.100.4", &stale, Duration::from_secs(60))
            .await
            .unwrap();

        let decision = policy.evaluate(&identity, now).await.unwrap();
        assert_eq!(decision, Decision::Allowed { remaining: Some(3) });

        let reset = guests.load("198.51.100.4").await.unwrap().unwrap();
        assert_eq!(reset.count, 0);
        assert_eq!(reset.window_start, now);
    }

    #[tokio::test]
    async fn test_guest_window_not_rolled_within_24h() {
        let (guests, _, policy) = policy();
        let identity = CallerIdentity::guest("198.51.100.5");
        let now = Utc::now();

        let active = GuestUsage {
            count: 3,
            window_start: now - chrono::Duration::hours(23),
        };
        guests
            .save("198.51.100.5", &active, Duration::from_secs(60))
            .await
            .unwrap();

        let decision = policy.evaluate(&identity, now).await.unwrap();
        assert!(!decision.is_allowed());
    }

    #[tokio::test]
    async fn test_free_counter_resets_on_new_day() {
        let (_, users, policy) = policy();
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let yesterday = (now - chrono::Duration::days(1)).date_naive();

        users.seed(user_id, 5, Some(yesterday));
        let identity = CallerIdentity::registered(user_id, UserPlan::Free);

        let decision = policy.evaluate(&identity, now).await.unwrap();
        assert_eq!(decision, Decision::Allowed { remaining: Some(5) });

        let counter = users.snapshot(user_id).unwrap();
        assert_eq!(counter.count, 0);
        assert_eq!(counter.day, Some(now.date_naive()));
    }

    #[tokio::test]
    async fn test_free_denied_at_limit_without_mutation() {
        let (_, users, policy) = policy();
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        users.seed(user_id, 5, Some(now.date_naive()));
        let identity = CallerIdentity::registered(user_id, UserPlan::Free);

        let decision = policy.evaluate(&identity, now).await.unwrap();
        assert_eq!(
            decision,
            Decision::Denied {
                reason: DenyReason::DailyLimitReached
            }
        );

        let counter = users.snapshot(user_id).unwrap();
        assert_eq!(counter.count, 5);
    }

    #[tokio::test]
    async fn test_premium_never_denied() {
        let (_, users, policy) = policy();
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        // A premium user with an absurd counter value is still unlimited.
        users.seed(user_id, 10_000, Some(now.date_naive()));
        let identity = CallerIdentity::registered(user_id, UserPlan::Premium);

        let decision = policy.evaluate(&identity, now).await.unwrap();
        assert_eq!(decision, Decision::Allowed { remaining: None });

        // And commit is a no-op for premium.
        assert_eq!(policy.commit(&identity, now).await.unwrap(), None);
        assert_eq!(users.snapshot(user_id).unwrap().count, 10_000);
    }

    #[tokio::test]
    async fn test_commit_decrements_remaining() {
        let (_, users, policy) = policy();
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        users.seed(user_id, 0, Some(now.date_naive()));
        let identity = CallerIdentity::registered(user_id, UserPlan::Free);

        assert_eq!(policy.commit(&identity, now).await.unwrap(), Some(4));
        assert_eq!(policy.commit(&identity, now).await.unwrap(), Some(3));
        assert_eq!(users.snapshot(user_id).unwrap().count, 2);
    }

    #[tokio::test]
    async fn test_skipped_commit_leaves_counter_unchanged() {
        let (guests, _, policy) = policy();
        let identity = CallerIdentity::guest("192.0.2.1");
        let now = Utc::now();

        let decision = policy.evaluate(&identity, now).await.unwrap();
        assert!(decision.is_allowed());

        // The caller observed a generation failure and never committed.
        let usage = guests.load("192.0.2.1").await.unwrap().unwrap();
        assert_eq!(usage.count, 0);
    }
}

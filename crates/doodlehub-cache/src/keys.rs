//! Cache key builders for all DoodleHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all DoodleHub cache keys.
const PREFIX: &str = "doodlehub";

// ── Guest quota keys ───────────────────────────────────────

/// Cache key for a guest generation counter.
pub fn guest_counter(caller_key: &str) -> String {
    format!("{PREFIX}:guest:{caller_key}")
}

// ── User keys ──────────────────────────────────────────────

/// Cache key for a user entity by ID.
pub fn user_by_id(user_id: Uuid) -> String {
    format!("{PREFIX}:user:{user_id}")
}

// ── Billing keys ───────────────────────────────────────────

/// Cache key recording an already-processed webhook event (dedup).
pub fn webhook_event(event_id: &str) -> String {
    format!("{PREFIX}:webhook:{event_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_key() {
        assert_eq!(guest_counter("203.0.113.9"), "doodlehub:guest:203.0.113.9");
    }

    #[test]
    fn test_user_key() {
        let id = Uuid::nil();
        assert_eq!(
            user_by_id(id),
            "doodlehub:user:00000000-0000-0000-0000-000000000000"
        );
    }
}

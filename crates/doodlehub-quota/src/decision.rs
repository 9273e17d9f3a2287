//! Quota decisions and denial reasons.

use serde::{Deserialize, Serialize};

/// Why a generation request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The guest rolling-window limit is exhausted.
    GuestLimitReached,
    /// The free-plan daily limit is exhausted.
    DailyLimitReached,
}

impl DenyReason {
    /// Stable wire code surfaced as the `error` field of the rejection.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GuestLimitReached => "guest_limit_reached",
            Self::DailyLimitReached => "daily_limit_reached",
        }
    }

    /// Human-readable message accompanying the rejection.
    pub fn message(&self) -> &'static str {
        match self {
            Self::GuestLimitReached => {
                "You've used all your free guest generations. Sign up for a free account to keep creating."
            }
            Self::DailyLimitReached => {
                "You've reached today's generation limit. Upgrade to premium for unlimited pages."
            }
        }
    }
}

/// Outcome of a quota evaluation.
///
/// A denied decision is terminal for the request; the caller surfaces it
/// as a structured rejection, not an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The generation may proceed. `remaining` is the residual quota
    /// *before* this generation is committed; `None` means unlimited.
    Allowed {
        /// Generations left in the current window/day, if bounded.
        remaining: Option<u32>,
    },
    /// The generation is rejected.
    Denied {
        /// Why the request was rejected.
        reason: DenyReason,
    },
}

impl Decision {
    /// Whether the generation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

//! # doodlehub-quota
//!
//! The tiered usage-quota policy gating content generation.
//!
//! Three caller tiers, each with its own reset semantics:
//!
//! - **Guests** get a fixed number of generations per *rolling* window,
//!   counted against a caller-supplied key in an injected
//!   [`store::GuestCounterStore`].
//! - **Free-plan users** get a fixed number per *calendar day*, counted on
//!   their user row.
//! - **Premium users** are never counted.
//!
//! Eligibility ([`QuotaPolicy::evaluate`]) and charging
//! ([`QuotaPolicy::commit`]) are separate operations; callers commit only
//! after the downstream generation succeeded, so failed generations never
//! consume quota. The check and the commit are not serialized against each
//! other: concurrent requests for one key can both pass an evaluate near
//! the limit. This under-enforcement is accepted; the registered-user
//! commit is a single atomic increment so counts themselves are never lost.

pub mod decision;
pub mod identity;
pub mod policy;
pub mod store;

pub use decision::{Decision, DenyReason};
pub use identity::CallerIdentity;
pub use policy::QuotaPolicy;
pub use store::{DailyCounter, GuestUsage};

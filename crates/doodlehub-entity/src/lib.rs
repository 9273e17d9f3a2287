//! # doodlehub-entity
//!
//! Domain entity models for DoodleHub: users with their plan/role/status,
//! the append-only activity log, and newsletter subscriptions.

pub mod activity;
pub mod newsletter;
pub mod user;

pub use activity::{Activity, ActivityKind, CreateActivity};
pub use newsletter::NewsletterSubscription;
pub use user::{CreateUser, User, UserPlan, UserRole, UserStatus};

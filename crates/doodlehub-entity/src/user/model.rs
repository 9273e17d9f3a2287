//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::plan::UserPlan;
use super::role::UserRole;
use super::status::UserStatus;

/// A registered user in the DoodleHub system.
///
/// Accounts are provisioned from the external auth provider's token
/// claims; DoodleHub stores no credentials.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier (the auth provider's subject).
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Subscription plan.
    pub plan: UserPlan,
    /// Role (admin console gate).
    pub role: UserRole,
    /// Account status.
    pub status: UserStatus,
    /// Generations performed on `generation_count_date`.
    pub generation_count: i32,
    /// Calendar day the counter belongs to (server-local date).
    pub generation_count_date: Option<NaiveDate>,
    /// Payment processor customer identifier.
    pub billing_customer_id: Option<String>,
    /// Active subscription identifier at the payment processor.
    pub billing_subscription_id: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this user is on the premium plan.
    pub fn is_premium(&self) -> bool {
        self.plan.is_premium()
    }

    /// Check whether the account may use the service.
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// The auth provider's subject for this user.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Initial plan.
    pub plan: UserPlan,
    /// Initial role.
    pub role: UserRole,
}

impl CreateUser {
    /// A freshly provisioned free-plan member.
    pub fn member(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: None,
            plan: UserPlan::Free,
            role: UserRole::Member,
        }
    }
}

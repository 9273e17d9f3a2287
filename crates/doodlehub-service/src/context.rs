//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use doodlehub_entity::user::{UserPlan, UserRole};
use doodlehub_quota::CallerIdentity;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email.
    pub email: String,
    /// The user's plan at request time.
    pub plan: UserPlan,
    /// The user's role at request time.
    pub role: UserRole,
    /// IP address of the request origin.
    pub ip_address: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        email: String,
        plan: UserPlan,
        role: UserRole,
        ip_address: String,
    ) -> Self {
        Self {
            user_id,
            email,
            plan,
            role,
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The quota identity of this caller.
    pub fn identity(&self) -> CallerIdentity {
        CallerIdentity::registered(self.user_id, self.plan)
    }
}

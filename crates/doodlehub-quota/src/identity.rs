//! Caller identity resolved before quota evaluation.

use uuid::Uuid;

use doodlehub_entity::user::UserPlan;

/// Who is asking for a generation.
///
/// Resolution happens upstream (token verification in the API layer);
/// an unauthenticated caller is a `Guest`, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    /// Unauthenticated visitor identified by a best-effort key
    /// (the originating address).
    Guest {
        /// Counter key for this caller.
        key: String,
    },
    /// Authenticated user with a known plan.
    Registered {
        /// The user's ID.
        user_id: Uuid,
        /// The user's current plan.
        plan: UserPlan,
    },
}

impl CallerIdentity {
    /// Create a guest identity from a caller key.
    pub fn guest(key: impl Into<String>) -> Self {
        Self::Guest { key: key.into() }
    }

    /// Create a registered identity.
    pub fn registered(user_id: Uuid, plan: UserPlan) -> Self {
        Self::Registered { user_id, plan }
    }

    /// Whether this caller is a guest.
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }

    /// The user ID, if registered.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Registered { user_id, .. } => Some(*user_id),
            Self::Guest { .. } => None,
        }
    }
}

//! Activity log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::ActivityKind;

/// An immutable activity log entry recording a successful generation.
///
/// Rows are append-only: the application never updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: Uuid,
    /// The user the generation belongs to (`None` for guests).
    pub user_id: Option<Uuid>,
    /// What was generated.
    pub kind: ActivityKind,
    /// The prompt as the user typed it.
    pub prompt: String,
    /// URL of the generated image.
    pub image_url: String,
    /// When the generation completed.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivity {
    /// Owning user, if registered.
    pub user_id: Option<Uuid>,
    /// What was generated.
    pub kind: ActivityKind,
    /// The original prompt.
    pub prompt: String,
    /// URL of the generated image.
    pub image_url: String,
}

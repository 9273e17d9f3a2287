//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Generation request body (coloring and tracing).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Free-text prompt.
    #[validate(length(min = 1, message = "Prompt is required"))]
    #[serde(default)]
    pub prompt: String,
}

/// Newsletter subscribe/unsubscribe request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsletterRequest {
    /// Subscriber email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Admin request to change a user's plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPlanRequest {
    /// Target plan: `"free"` or `"premium"`.
    pub plan: String,
}

/// Admin request to change a user's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    /// Target status: `"active"` or `"disabled"`.
    pub status: String,
}

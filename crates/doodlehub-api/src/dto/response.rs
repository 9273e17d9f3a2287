//! Response DTOs.
//!
//! The generation endpoints and the public limits endpoint speak
//! camelCase because the web frontend consumes them directly; the
//! account/admin endpoints serialize entities as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use doodlehub_entity::user::User;
use doodlehub_prompt::TracingSpec;
use doodlehub_service::generation::GenerationOutput;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Response of the generation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    /// Always `true` on success.
    pub success: bool,
    /// URL of the generated image.
    pub image_url: String,
    /// The prompt actually sent to the image API.
    pub prompt: String,
    /// The prompt as the user typed it.
    pub original_prompt: String,
    /// Residual guest quota after this generation (guests only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_remaining: Option<u32>,
    /// Derived tracing specification (tracing worksheets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceResponse>,
}

impl From<GenerationOutput> for GenerationResponse {
    fn from(output: GenerationOutput) -> Self {
        Self {
            success: true,
            image_url: output.image_url,
            prompt: output.prompt,
            original_prompt: output.original_prompt,
            guest_remaining: output.guest_remaining,
            trace: output.trace.map(TraceResponse::from),
        }
    }
}

/// The tracing specification as returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResponse {
    /// What to trace: `"letter"`, `"number"`, or `"word"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The glyph or word to trace.
    pub content: String,
    /// Writing style.
    pub style: String,
    /// Human-readable description.
    pub description: String,
}

impl From<TracingSpec> for TraceResponse {
    fn from(spec: TracingSpec) -> Self {
        Self {
            kind: spec.kind.as_str().to_string(),
            content: spec.content,
            style: spec.style.as_str().to_string(),
            description: spec.description,
        }
    }
}

/// Public quota constants for the frontend pre-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsResponse {
    /// Server-enforced guest limit per rolling window.
    pub guest_limit: u32,
    /// Advisory limit the frontend applies before calling the server.
    pub guest_soft_limit: u32,
    /// Length of the guest window in hours.
    pub guest_window_hours: u32,
    /// Daily limit for registered free-plan users.
    pub free_daily_limit: u32,
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Plan.
    pub plan: String,
    /// Role.
    pub role: String,
    /// Status.
    pub status: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            plan: user.plan.to_string(),
            role: user.role.to_string(),
            status: user.status.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Checkout session response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Hosted checkout URL to redirect the user to.
    pub checkout_url: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Cache status.
    pub cache: String,
}

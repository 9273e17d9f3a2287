//! Token verification configuration.
//!
//! DoodleHub does not issue tokens itself; it verifies access tokens
//! minted by the external auth provider with a shared HS256 secret.

use serde::{Deserialize, Serialize};

/// Auth token verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify provider-issued tokens.
    pub token_secret: String,
    /// Expected `iss` claim; empty disables issuer checking.
    #[serde(default)]
    pub issuer: String,
    /// Clock-skew leeway in seconds applied during validation.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    5
}

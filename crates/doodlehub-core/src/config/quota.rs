//! Usage quota configuration.
//!
//! Single source of truth for every generation limit. The frontend
//! pre-check limit (`guest_soft_limit`) lives here too and is published
//! through the public limits endpoint instead of being hardcoded
//! client-side.

use serde::{Deserialize, Serialize};

/// Generation quota configuration for all caller tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Generations a guest may perform per rolling window.
    #[serde(default = "default_guest_limit")]
    pub guest_limit: u32,
    /// Advisory limit the frontend enforces before calling the server.
    /// Not enforced server-side; published via the limits endpoint.
    #[serde(default = "default_guest_soft_limit")]
    pub guest_soft_limit: u32,
    /// Length of the guest rolling window in hours.
    #[serde(default = "default_guest_window_hours")]
    pub guest_window_hours: u32,
    /// Generations a registered free-plan user may perform per calendar day.
    #[serde(default = "default_free_daily_limit")]
    pub free_daily_limit: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            guest_limit: default_guest_limit(),
            guest_soft_limit: default_guest_soft_limit(),
            guest_window_hours: default_guest_window_hours(),
            free_daily_limit: default_free_daily_limit(),
        }
    }
}

fn default_guest_limit() -> u32 {
    3
}

fn default_guest_soft_limit() -> u32 {
    2
}

fn default_guest_window_hours() -> u32 {
    24
}

fn default_free_daily_limit() -> u32 {
    5
}

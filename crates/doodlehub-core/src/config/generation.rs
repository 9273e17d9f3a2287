//! Image generation API configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the external image generation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the image generation API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model identifier to request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Image size requested from the API.
    #[serde(default = "default_image_size")]
    pub image_size: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_timeout() -> u64 {
    60
}

//! OpenAI-compatible images API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use doodlehub_core::config::generation::GenerationConfig;
use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;

use crate::generator::{GeneratedImage, ImageGenerator};

/// Request body for `POST /v1/images/generations`.
#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

/// Response body of a successful generation.
#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

/// Error body the API returns on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// HTTP client for an OpenAI-compatible images endpoint.
#[derive(Clone)]
pub struct OpenAiImageClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    image_size: String,
}

impl std::fmt::Debug for OpenAiImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiImageClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiImageClient {
    /// Create a client from configuration.
    pub fn new(config: &GenerationConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    doodlehub_core::error::ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            image_size: config.image_size.clone(),
        })
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> AppResult<GeneratedImage> {
        let url = format!("{}/v1/images/generations", self.base_url);
        debug!(model = %self.model, "Requesting image generation");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ImageRequest {
                model: &self.model,
                prompt,
                n: 1,
                size: &self.image_size,
            })
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    doodlehub_core::error::ErrorKind::ExternalService,
                    format!("Image generation request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            warn!(status = %status, "Image generation API returned an error");
            return Err(AppError::external_service(format!(
                "Image generation failed: {message}"
            )));
        }

        let body: ImageResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                doodlehub_core::error::ErrorKind::ExternalService,
                "Invalid image generation response",
                e,
            )
        })?;

        let datum = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("Image generation returned no results"))?;

        let image_url = datum
            .url
            .ok_or_else(|| AppError::external_service("Image generation returned no URL"))?;

        Ok(GeneratedImage {
            url: image_url,
            revised_prompt: datum.revised_prompt,
        })
    }
}

//! The image generator abstraction.

use async_trait::async_trait;

use doodlehub_core::result::AppResult;

/// A successfully generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Where the image can be fetched.
    pub url: String,
    /// The provider's revision of the prompt, when it reports one.
    pub revised_prompt: Option<String>,
}

/// Produces an image for a fully-built prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync + std::fmt::Debug + 'static {
    /// Generate one image. Errors map to `ErrorKind::ExternalService`.
    async fn generate(&self, prompt: &str) -> AppResult<GeneratedImage>;
}

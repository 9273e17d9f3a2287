//! Static image generator for tests and offline development.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use doodlehub_core::error::AppError;
use doodlehub_core::result::AppResult;

use crate::generator::{GeneratedImage, ImageGenerator};

/// Returns a fixed URL, or fails on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct StaticImageGenerator {
    /// When set, every call fails with an external-service error.
    failing: AtomicBool,
    /// Number of generate calls observed.
    calls: AtomicU64,
}

impl StaticImageGenerator {
    /// Create a generator that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that always fails.
    pub fn failing() -> Self {
        let generator = Self::default();
        generator.failing.store(true, Ordering::SeqCst);
        generator
    }

    /// Toggle failure mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of generate calls observed so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for StaticImageGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<GeneratedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external_service("Image generation unavailable"));
        }

        Ok(GeneratedImage {
            url: format!("https://images.example.com/{}.png", prompt.len()),
            revised_prompt: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_and_failure_modes() {
        let generator = StaticImageGenerator::new();
        assert!(generator.generate("a cat").await.is_ok());

        generator.set_failing(true);
        assert!(generator.generate("a cat").await.is_err());
        assert_eq!(generator.call_count(), 2);
    }
}

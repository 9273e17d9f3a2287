//! # doodlehub-generate
//!
//! Client for the external image generation API. The rest of the
//! application talks to the [`ImageGenerator`] trait; the HTTP client and
//! a static mock implement it.
//!
//! No retries live here. A failed call is reported to the caller, and
//! failed calls are never charged against quota.

pub mod generator;
pub mod mock;
pub mod openai;

pub use generator::{GeneratedImage, ImageGenerator};
pub use mock::StaticImageGenerator;
pub use openai::OpenAiImageClient;

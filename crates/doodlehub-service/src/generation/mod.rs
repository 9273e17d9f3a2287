//! Generation orchestration.

pub mod service;

pub use service::{GenerationOutput, GenerationService};

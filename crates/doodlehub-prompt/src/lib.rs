//! # doodlehub-prompt
//!
//! Deterministic classification of free-text prompts into structured
//! tracing specifications for handwriting worksheets.
//!
//! The classifier is a pure function over an ordered rule table: earlier,
//! more specific patterns intentionally shadow later, more general ones,
//! and unclassifiable input degrades to a default rather than erroring.

pub mod classifier;
pub mod spec;

pub use classifier::classify;
pub use spec::{TraceKind, TraceStyle, TracingSpec};

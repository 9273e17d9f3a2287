//! The structured tracing specification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of glyph the worksheet traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    /// A single letter.
    Letter,
    /// A number.
    Number,
    /// A whole word.
    Word,
}

impl TraceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Number => "number",
            Self::Word => "word",
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Writing style for the traced content.
///
/// Numbers carry a style too for schema uniformity; it has no effect on
/// rendering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStyle {
    /// Uppercase print letters.
    Uppercase,
    /// Lowercase print letters.
    Lowercase,
    /// Cursive script.
    Cursive,
}

impl TraceStyle {
    /// Return the style as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Cursive => "cursive",
        }
    }
}

impl fmt::Display for TraceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured tracing specification derived from a free-text prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingSpec {
    /// What to trace.
    pub kind: TraceKind,
    /// The glyph or word to trace, as captured from the prompt.
    pub content: String,
    /// Writing style.
    pub style: TraceStyle,
    /// Human-readable description used to build the worksheet prompt.
    pub description: String,
}

impl TracingSpec {
    /// Build a letter specification.
    pub fn letter(content: impl Into<String>, style: TraceStyle) -> Self {
        let content = content.into();
        let description = format!("the {} letter {}", style.as_str(), content);
        Self {
            kind: TraceKind::Letter,
            content,
            style,
            description,
        }
    }

    /// Build a number specification.
    pub fn number(content: impl Into<String>) -> Self {
        let content = content.into();
        let description = format!("the number {content}");
        Self {
            kind: TraceKind::Number,
            content,
            style: TraceStyle::Uppercase,
            description,
        }
    }

    /// Build a word specification.
    pub fn word(content: impl Into<String>) -> Self {
        let content = content.into();
        let description = format!("the word \"{content}\" in uppercase letters");
        Self {
            kind: TraceKind::Word,
            content,
            style: TraceStyle::Uppercase,
            description,
        }
    }
}

//! Activity kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of content a generation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// A coloring page.
    Coloring,
    /// A handwriting-tracing worksheet.
    Tracing,
}

impl ActivityKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coloring => "coloring",
            Self::Tracing => "tracing",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = doodlehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coloring" => Ok(Self::Coloring),
            "tracing" => Ok(Self::Tracing),
            _ => Err(doodlehub_core::AppError::validation(format!(
                "Invalid activity kind: '{s}'. Expected one of: coloring, tracing"
            ))),
        }
    }
}

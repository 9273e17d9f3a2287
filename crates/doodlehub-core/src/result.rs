//! Convenience result type alias for DoodleHub.

use crate::error::AppError;

/// A specialized `Result` type for DoodleHub operations.
pub type AppResult<T> = Result<T, AppError>;

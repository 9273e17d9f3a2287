//! Custom Axum extractors.

pub mod auth;
pub mod caller;
pub mod pagination;

pub use auth::AuthUser;
pub use caller::Caller;
pub use pagination::PaginationParams;

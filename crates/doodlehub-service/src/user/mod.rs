//! User self-service operations.

pub mod service;

pub use service::{UsageSummary, UserService};

//! Subscription billing operations.

pub mod service;

pub use service::BillingService;

//! Newsletter subscription operations.

pub mod service;

pub use service::NewsletterService;

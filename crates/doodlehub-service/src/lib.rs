//! # doodlehub-service
//!
//! Business logic service layer for DoodleHub. Each service orchestrates
//! repositories, the quota policy, and external clients to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod admin;
pub mod billing;
pub mod context;
pub mod generation;
pub mod newsletter;
pub mod user;

pub use admin::AdminService;
pub use billing::BillingService;
pub use context::RequestContext;
pub use generation::{GenerationOutput, GenerationService};
pub use newsletter::NewsletterService;
pub use user::{UsageSummary, UserService};

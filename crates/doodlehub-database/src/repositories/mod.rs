//! Concrete repository implementations, one per entity.

pub mod activity;
pub mod newsletter;
pub mod user;

pub use activity::ActivityRepository;
pub use newsletter::NewsletterRepository;
pub use user::UserRepository;

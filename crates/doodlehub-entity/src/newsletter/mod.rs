//! Newsletter subscription entity.

pub mod model;

pub use model::NewsletterSubscription;

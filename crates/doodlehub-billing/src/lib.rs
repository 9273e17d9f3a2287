//! # doodlehub-billing
//!
//! Integration with the external payment processor (Stripe-compatible):
//! checkout session creation for the premium subscription and webhook
//! event parsing with signature verification.

pub mod stripe;
pub mod webhook;

pub use stripe::{CheckoutSession, StripeClient};
pub use webhook::{CheckoutSessionObject, SubscriptionObject, WebhookEvent, verify_signature};

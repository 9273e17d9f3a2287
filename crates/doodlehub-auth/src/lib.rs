//! # doodlehub-auth
//!
//! Verification of access tokens minted by the external auth provider.
//! DoodleHub never issues tokens; it only validates the provider's HS256
//! signature and reads the identity claims.

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::TokenVerifier;

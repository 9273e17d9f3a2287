//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use doodlehub_core::config::auth::AuthConfig;
use doodlehub_core::error::AppError;

use super::claims::Claims;

/// Validates provider-issued access tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks signature validity, expiration, and (when configured) issuer.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret".to_string(),
            issuer: String::new(),
            leeway_seconds: 5,
        }
    }

    fn mint(secret: &str, exp_offset: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "parent@example.com".to_string(),
            name: None,
            iat: now,
            exp: now + exp_offset,
            iss: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode")
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(&config());
        let token = mint("test-secret", 3600);
        let claims = verifier.verify(&token).expect("valid token");
        assert_eq!(claims.email, "parent@example.com");
    }

    #[test]
    fn test_reject_wrong_secret() {
        let verifier = TokenVerifier::new(&config());
        let token = mint("other-secret", 3600);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_reject_expired_token() {
        let verifier = TokenVerifier::new(&config());
        let token = mint("test-secret", -3600);
        assert!(verifier.verify(&token).is_err());
    }
}

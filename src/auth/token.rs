use crate::error::AppError;
use chrono::Duration;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the authenticated username.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
}

/// Why a token failed verification.
///
/// Callers that answer HTTP requests must collapse both variants into the
/// same response; the distinction exists for logs and tests only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed or its signature did not check out.
    Malformed,
    /// The token parsed and verified but its expiry has passed.
    Expired,
}

/// Issues and verifies signed bearer tokens.
///
/// The signing key and token lifetime are fixed at construction, so the
/// service is built once at startup from [`Config`](crate::config::Config)
/// and shared as application data. Verification checks signature and expiry
/// only; it never consults the user store.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Produces a signed token embedding `username` and an absolute expiry
    /// `ttl` from now.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: username.to_string(),
            exp: expiration,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token and returns the embedded username.
    ///
    /// Default validation checks are applied (signature, expiration with the
    /// library's leeway). Every failure other than an expired signature is
    /// reported as [`TokenError::Malformed`].
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(secret, Duration::hours(24))
    }

    #[test]
    fn test_token_issue_and_verify() {
        let tokens = service("test_secret_for_issue_verify");
        let token = tokens.issue("alice").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn test_token_expiration() {
        // Negative lifetime puts the expiry well past the default leeway.
        let tokens = TokenService::new("test_secret_for_expiration", Duration::minutes(-5));
        let expired = tokens.issue("bob").unwrap();
        assert_eq!(tokens.verify(&expired), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_signed_with_other_key() {
        let issuer = service("one_secret");
        let verifier = service("a_completely_different_secret");
        let token = issuer.issue("carol").unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_garbage_token() {
        let tokens = service("test_secret_for_garbage");
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_tampered_token() {
        let tokens = service("test_secret_for_tamper");
        let token = tokens.issue("dave").unwrap();
        // Flip part of the payload segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = format!("x{}", &parts[1][1..]);
        let tampered = parts.join(".");
        assert_eq!(tokens.verify(&tampered), Err(TokenError::Malformed));
    }
}

//! HS256 token generation and verification.
//!
//! Tokens carry only `sub`, `iat` and `exp`. The signing secret is used as
//! raw UTF-8 bytes and must be supplied by the caller.

use crate::error::TokenError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Subject used when none is given on the command line.
pub const DEFAULT_SUBJECT: &str = "banbann";

/// Token lifetime in seconds (one day).
pub const DEFAULT_TTL_SECS: i64 = 86_400;

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn issued_at(subject: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: subject.into(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }
}

/// Signs claims with a shared HMAC-SHA256 secret.
pub struct TokenSigner {
    key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Result<Self, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidLifetime);
        }
        self.ttl = ttl;
        Ok(self)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `subject` issued now.
    pub fn sign(&self, subject: &str) -> Result<String, TokenError> {
        self.sign_at(subject, Utc::now())
    }

    pub fn sign_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::issued_at(subject, now, self.ttl);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)?;
        tracing::debug!(sub = %claims.sub, iat = claims.iat, exp = claims.exp, "Signed token");
        Ok(token)
    }
}

/// Generate a one-day HS256 token for `subject`.
///
/// # Example
/// ```
/// use devutil_core::token::{generate_token, verify_token};
///
/// let token = generate_token("banbann", "local-dev-secret").unwrap();
/// let claims = verify_token(&token, "local-dev-secret").unwrap();
/// assert_eq!(claims.sub, "banbann");
/// ```
pub fn generate_token(subject: &str, secret: &str) -> Result<String, TokenError> {
    TokenSigner::new(secret)?.sign(subject)
}

/// Check the signature and expiry of `token` and return its claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

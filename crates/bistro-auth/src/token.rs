//! # Token Service
//!
//! Issues and verifies signed, time-limited bearer tokens (HS256 JWTs).
//! Validity is purely a function of signature and expiry: verification
//! never consults storage, and tokens are never persisted.

use bistro_core::{ApiError, ApiResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token lifetime
const TOKEN_TTL_HOURS: i64 = 24;

/// The identity-bearing payload signed inside a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity this token speaks for
    pub email: String,

    /// Issued-at, seconds since epoch
    pub iat: i64,

    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a process-wide secret.
///
/// The secret is fixed for the process lifetime; rotation is out of scope.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Override the token lifetime (tests exercise expiry this way)
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::new(secret)
        }
    }

    /// Sign a token for the given identity, expiring `ttl` from now.
    /// CPU-bound signing only, no side effects.
    pub fn issue(&self, email: &str) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Any failure collapses to `Unauthenticated`; the caller learns
    /// nothing about which check tripped.
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token verification failed");
                ApiError::Unauthenticated
            })
    }
}

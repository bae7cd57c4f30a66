//! Bearer tokens
//!
//! Tokens are HS256 JWTs carrying the user id. They are signed with the
//! server's configured secret and expire after the configured number of days.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use spendwise_core::UserId;

/// Claims carried by a bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user
    pub id: UserId,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token for `user` valid for `ttl_days`
pub fn issue(user: UserId, secret: &str, ttl_days: i64) -> anyhow::Result<String> {
    let now = Utc::now();
    let claims = Claims {
        id: user,
        iat: now.timestamp(),
        exp: (now + Duration::days(ttl_days)).timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Check signature and expiry, returning the claims
pub fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

pub mod password;

/// Claims carried by every access token: the account id plus issue/expiry times.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(account_id: Uuid) -> Self {
        Self::with_expiry_mins(account_id, config::config().security.jwt_expiry_mins)
    }

    fn with_expiry_mins(account_id: Uuid, expiry_mins: u64) -> Self {
        let now = Utc::now();
        // An absurd TTL override falls back to the production default
        // instead of overflowing the duration arithmetic
        let mins = i64::try_from(expiry_mins).unwrap_or(i64::MAX);
        let ttl = Duration::try_minutes(mins).unwrap_or_else(|| Duration::minutes(15));
        let exp = (now + ttl).timestamp();

        Self {
            sub: account_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    TokenValidation(String),

    #[error("JWT secret not configured")]
    MissingSecret,
}

/// Sign claims into a bearer token using the process-wide secret
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;
    encode_token(claims, secret)
}

/// Validate a bearer token's signature and expiry, returning its claims
pub fn decode_jwt(token: &str) -> Result<Claims, JwtError> {
    let secret = &config::config().security.jwt_secret;
    decode_token(token, secret)
}

fn encode_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

fn decode_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    // Default validation covers HS256 signature plus exp
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::TokenValidation(e.to_string()))
}

use sqlx::PgPool;

use crate::auth::password::{self, PasswordError};
use crate::auth::{self, Claims, JwtError};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Account;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email is already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Jwt(#[from] JwtError),
}

/// Signup and signin. Both are single storage statements with no retries;
/// duplicate-email races resolve through the unique index, not a pre-read.
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new() -> Result<Self, AuthError> {
        let pool = DatabaseManager::pool()?;
        Ok(Self { pool })
    }

    /// Hash the password and persist a new account. The returned row is safe
    /// to serialize outward: the hash field is marked skip_serializing.
    pub async fn signup(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let password_hash = password::hash_password(password)?;

        let result = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (email, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(account) => {
                tracing::info!(account_id = %account.id, "Account created");
                Ok(account)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::EmailTaken)
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Verify credentials and issue a signed, time-limited token. An unknown
    /// email and a wrong password produce the same error.
    pub async fn signin(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = auth::generate_jwt(&Claims::new(account.id))?;
        tracing::info!(account_id = %account.id, "Issued access token");
        Ok(token)
    }
}

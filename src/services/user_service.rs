use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Account;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Email is already registered")]
    EmailTaken,

    #[error("Account not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Partial profile update; absent fields keep their current value.
#[derive(Debug)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new() -> Result<Self, UserError> {
        let pool = DatabaseManager::pool()?;
        Ok(Self { pool })
    }

    pub async fn find_by_id(&self, account_id: Uuid) -> Result<Option<Account>, UserError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    /// Apply a partial profile edit in a single statement. Changing the email
    /// hits the same unique index as signup.
    pub async fn update_profile(
        &self,
        account_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Account, UserError> {
        let result = sqlx::query_as::<_, Account>(
            "UPDATE accounts
             SET email = COALESCE($2, email),
                 first_name = COALESCE($3, first_name),
                 last_name = COALESCE($4, last_name),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(account_id)
        .bind(update.email)
        .bind(update.first_name)
        .bind(update.last_name)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(account)) => Ok(account),
            Ok(None) => Err(UserError::NotFound),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(UserError::EmailTaken)
            }
            Err(other) => Err(other.into()),
        }
    }
}

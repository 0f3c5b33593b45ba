use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Bookmark;

/// Partial bookmark edit; absent fields keep their current value.
#[derive(Debug)]
pub struct BookmarkUpdate {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

/// Ownership-scoped bookmark CRUD. Every statement filters on `account_id`,
/// so a bookmark owned by someone else behaves exactly like a missing one.
pub struct BookmarkService {
    pool: PgPool,
}

impl BookmarkService {
    pub fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool()?;
        Ok(Self { pool })
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            "SELECT * FROM bookmarks WHERE account_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create(
        &self,
        owner: Uuid,
        title: &str,
        link: &str,
        description: Option<&str>,
    ) -> Result<Bookmark, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            "INSERT INTO bookmarks (account_id, title, link, description)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(owner)
        .bind(title)
        .bind(link)
        .bind(description)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            "SELECT * FROM bookmarks WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        update: BookmarkUpdate,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            "UPDATE bookmarks
             SET title = COALESCE($3, title),
                 link = COALESCE($4, link),
                 description = COALESCE($5, description),
                 updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(update.title)
        .bind(update.link)
        .bind(update.description)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns false when the bookmark is absent or owned by another account
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

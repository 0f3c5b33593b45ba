use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A user-owned record with a title and link. Every statement touching this
/// table is scoped by `account_id`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bookmark {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

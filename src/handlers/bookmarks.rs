// handlers/bookmarks.rs - /bookmarks CRUD, scoped to the authenticated caller

use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::models::Bookmark;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::bookmark_service::BookmarkUpdate;
use crate::services::BookmarkService;

/// GET /bookmarks - list the caller's bookmarks, newest first
pub async fn list(Extension(user): Extension<AuthUser>) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = BookmarkService::new()?.list(user.account_id).await?;
    Ok(Json(bookmarks))
}

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    pub description: Option<String>,
}

/// POST /bookmarks - create a bookmark owned by the caller
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateBookmarkBody>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    let mut field_errors = HashMap::new();
    if body.title.trim().is_empty() {
        field_errors.insert("title".to_string(), "This field is required".to_string());
    }
    if body.link.trim().is_empty() {
        field_errors.insert("link".to_string(), "This field is required".to_string());
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid bookmark payload", Some(field_errors)));
    }

    let bookmark = BookmarkService::new()?
        .create(user.account_id, &body.title, &body.link, body.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// GET /bookmarks/:id
///
/// A bookmark owned by another account is indistinguishable from a missing
/// one: both are 404.
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Bookmark>, ApiError> {
    let bookmark = BookmarkService::new()?
        .find(user.account_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Bookmark not found"))?;

    Ok(Json(bookmark))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookmarkBody {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

/// PATCH /bookmarks/:id - partial edit of a caller-owned bookmark
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookmarkBody>,
) -> Result<Json<Bookmark>, ApiError> {
    let mut field_errors = HashMap::new();
    if matches!(&body.title, Some(t) if t.trim().is_empty()) {
        field_errors.insert("title".to_string(), "Must not be empty".to_string());
    }
    if matches!(&body.link, Some(l) if l.trim().is_empty()) {
        field_errors.insert("link".to_string(), "Must not be empty".to_string());
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid bookmark payload", Some(field_errors)));
    }

    let update = BookmarkUpdate {
        title: body.title,
        link: body.link,
        description: body.description,
    };

    let bookmark = BookmarkService::new()?
        .update(user.account_id, id, update)
        .await?
        .ok_or_else(|| ApiError::not_found("Bookmark not found"))?;

    Ok(Json(bookmark))
}

/// DELETE /bookmarks/:id - returns 204 on success, 404 otherwise
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = BookmarkService::new()?.delete(user.account_id, id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Bookmark not found"))
    }
}

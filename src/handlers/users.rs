// handlers/users.rs - GET /users/me and PATCH /users

use axum::{response::Json, Extension};
use serde::Deserialize;
use std::collections::HashMap;

use crate::database::models::Account;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::user_service::ProfileUpdate;
use crate::services::UserService;

/// GET /users/me - return the authenticated caller's account
pub async fn me(Extension(user): Extension<AuthUser>) -> Result<Json<Account>, ApiError> {
    let account = UserService::new()?
        .find_by_id(user.account_id)
        .await?
        // The account vanished between token verification and here; treat it
        // like any other invalid-token case rather than a 404
        .ok_or_else(|| ApiError::unauthorized("Invalid token"))?;

    Ok(Json(account))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// PATCH /users - partial profile edit for the authenticated caller
///
/// Returns 200 with the updated account; 409 if the new email collides.
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UpdateUserBody>,
) -> Result<Json<Account>, ApiError> {
    if let Some(email) = &body.email {
        if email.trim().is_empty() || !email.contains('@') {
            let mut field_errors = HashMap::new();
            field_errors.insert("email".to_string(), "Must be a valid email address".to_string());
            return Err(ApiError::validation_error("Invalid profile payload", Some(field_errors)));
        }
    }

    let update = ProfileUpdate {
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
    };

    let account = UserService::new()?.update_profile(user.account_id, update).await?;

    Ok(Json(account))
}

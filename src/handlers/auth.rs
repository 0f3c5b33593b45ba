// handlers/auth.rs - POST /auth/signup and POST /auth/signin

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::database::models::Account;
use crate::error::ApiError;
use crate::services::AuthService;

/// Credentials body shared by signup and signin. Missing fields deserialize
/// to empty strings so validation can report them as 400, not a JSON error.
#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub access_token: String,
}

/// POST /auth/signup - register a new account
///
/// Returns 201 with the account's public fields, 400 on missing/invalid
/// fields, 409 when the email is already registered.
pub async fn signup(
    Json(body): Json<CredentialsBody>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    validate_credentials(&body)?;

    let account = AuthService::new()?.signup(&body.email, &body.password).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// POST /auth/signin - verify credentials and issue an access token
///
/// Returns 200 with `{access_token}`, 400 on missing/invalid fields,
/// 401 on bad credentials.
pub async fn signin(Json(body): Json<CredentialsBody>) -> Result<Json<SigninResponse>, ApiError> {
    validate_credentials(&body)?;

    let access_token = AuthService::new()?.signin(&body.email, &body.password).await?;

    Ok(Json(SigninResponse { access_token }))
}

fn validate_credentials(body: &CredentialsBody) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if body.email.trim().is_empty() {
        field_errors.insert("email".to_string(), "This field is required".to_string());
    } else if !body.email.contains('@') {
        field_errors.insert("email".to_string(), "Must be a valid email address".to_string());
    }

    if body.password.is_empty() {
        field_errors.insert("password".to_string(), "This field is required".to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid credentials payload", Some(field_errors)))
    }
}

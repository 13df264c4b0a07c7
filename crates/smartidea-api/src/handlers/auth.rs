//! Account registration and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{hash_password, verify_password};
use crate::{ApiError, AppState};
use smartidea_core::{provided, Error, NewUser, User};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub email: String,
    pub name: Option<String>,
}

/// Token plus the public part of the account.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

impl AuthResponse {
    fn new(token: String, user: User) -> Self {
        Self {
            token,
            user: UserSummary {
                email: user.email,
                name: user.name,
            },
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Create an account and sign a token for it.
///
/// # Returns
/// - 200 OK with `{token, user: {email, name}}`
/// - 400 Bad Request if email or password is missing, or the email is taken
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(email), Some(password)) = (provided(&req.email), provided(&req.password)) else {
        return Err(ApiError::BadRequest("Missing fields".to_string()));
    };

    if state.db.users.find_by_email(email).await?.is_some() {
        return Err(ApiError::BadRequest("Email exists".to_string()));
    }

    let user = state
        .db
        .users
        .create(NewUser {
            email: email.to_string(),
            name: provided(&req.name).map(String::from),
            password_hash: hash_password(password)?,
        })
        .await
        .map_err(|e| match e {
            Error::Conflict(_) => ApiError::BadRequest("Email exists".to_string()),
            other => other.into(),
        })?;

    info!(user_id = %user.id, "Registered user");
    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse::new(token, user)))
}

/// Exchange credentials for a token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
///
/// # Returns
/// - 200 OK with `{token, user: {email, name}}`
/// - 400 Bad Request with `Invalid credentials`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid credentials".to_string());

    let user = state
        .db
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(&req.password, &user.password_hash) {
        return Err(invalid());
    }

    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse::new(token, user)))
}

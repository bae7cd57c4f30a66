//! Registration and login handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{parse_json, token, AppError, AppState, AuthUser};
use spendwise_core::credentials;
use spendwise_core::models::User;

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A user with a freshly issued bearer token
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// POST /api/auth/register - Create an account and sign in
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let req: RegisterRequest = parse_json(&body)?;

    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request("All fields are required"));
    }

    credentials::validate_new_password(&req.password)?;

    if state.db.get_user_by_email(&req.email)?.is_some() {
        return Err(AppError::bad_request("User already exists"));
    }

    let password_hash = credentials::hash_password(&req.password)?;
    let user = state
        .db
        .create_user(&req.username, &req.email, &password_hash)?;
    let token = token::issue(
        user.id,
        &state.config.jwt_secret,
        state.config.token_ttl_days,
    )?;

    info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// POST /api/auth/login - Exchange email and password for a bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AuthResponse>, AppError> {
    let req: LoginRequest = parse_json(&body)?;

    // Unknown email and wrong password get the same answer
    let Some(creds) = state.db.get_user_credentials_by_email(&req.email)? else {
        warn!("Login failed: unknown email");
        return Err(AppError::bad_request("Invalid email or password"));
    };

    if !credentials::verify_password(&req.password, &creds.password_hash)? {
        warn!(user_id = creds.user.id, "Login failed: password mismatch");
        return Err(AppError::bad_request("Invalid email or password"));
    }

    let token = token::issue(
        creds.user.id,
        &state.config.jwt_secret,
        state.config.token_ttl_days,
    )?;

    info!(user_id = creds.user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: creds.user,
        token,
    }))
}

/// GET /api/auth/me - The authenticated user
pub async fn get_me(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<User> {
    Json(user)
}

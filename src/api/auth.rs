use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{StatusCode, request::Parts},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, MessageResponse};
use crate::auth::{generate_access_token, generate_refresh_token, hash_refresh_token,
    validate_access_token};
use crate::db::repositories::user::verify_password;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub username: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

// ============================================================================
// Authenticated-user extractor
// ============================================================================

/// Authenticated user extracted from a Bearer access token. Use as a handler
/// parameter on every route that requires authentication; the user identity
/// is always explicit, never ambient.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Expected: Bearer <token>"))?;

        let claims = validate_access_token(token.trim(), &state.config().auth)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        tracing::Span::current().record("user_id", claims.sub);

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register/
/// Create a new user account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let username = required_field(payload.username, "username")?;
    let email = required_field(payload.email, "email")?;
    let password = required_field(payload.password, "password")?;

    if state.store().get_user_by_username(&username).await?.is_some() {
        return Err(ApiError::validation("Username is already taken"));
    }
    if state.store().get_user_by_email(&email).await?.is_some() {
        return Err(ApiError::validation("Email is already registered"));
    }

    let user = state.store().create_user(&username, &email, &password).await?;

    tracing::info!("Registered user: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully!")),
    ))
}

/// POST /login/
/// Authenticate with username (or email) and password; returns an access
/// token and a refresh token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let (user, password_hash) = state
        .store()
        .find_user_for_login(&payload.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid login credentials"))?;

    let is_valid = verify_password(password_hash, payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Password verification error: {e}")))?;

    if !is_valid {
        return Err(ApiError::unauthorized("Invalid login credentials"));
    }

    let config = &state.config().auth;
    let access = generate_access_token(user.id, &user.username, config)
        .map_err(|e| ApiError::internal(format!("Token generation error: {e}")))?;

    let (refresh, refresh_hash) = generate_refresh_token();
    let expires_at = chrono::Utc::now() + chrono::Duration::days(config.refresh_token_expiry_days);

    state
        .store()
        .create_session(user.id, &refresh_hash, expires_at)
        .await?;

    Ok(Json(LoginResponse {
        access,
        refresh,
        username: user.username,
        email: user.email,
    }))
}

/// POST /logout/
/// Revoke the refresh-token session. Returns 205 Reset Content.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<LogoutRequest>,
) -> Result<StatusCode, ApiError> {
    let token_hash = hash_refresh_token(&payload.refresh);

    let session = state
        .store()
        .find_active_session(&token_hash)
        .await?
        .filter(|s| s.user_id == user.user_id)
        .ok_or_else(|| ApiError::validation("Invalid refresh token"))?;

    state.store().revoke_session(session.id).await?;

    tracing::info!("User logged out: {}", user.username);

    Ok(StatusCode::RESET_CONTENT)
}

// ============================================================================
// Helpers
// ============================================================================

fn required_field(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{name} is required"))),
    }
}

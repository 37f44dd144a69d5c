use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::{AddWatchlistRequest, ApiError, AppState, MessageResponse, WatchlistEntryDto};
use crate::db::DEFAULT_STATUS;

const VALID_STATUSES: [&str; 3] = ["to_watch", "watching", "completed"];

/// POST /watchlist/
/// Add a movie to the caller's watchlist, or update the status of the
/// existing entry.
pub async fn add(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<AddWatchlistRequest>,
) -> Result<(StatusCode, Json<WatchlistEntryDto>), ApiError> {
    let movie_id = payload
        .movie_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("movie_id is required"))?;

    let status = payload.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
    if !VALID_STATUSES.contains(&status.as_str()) {
        return Err(ApiError::validation(
            "status must be one of: to_watch, watching, completed",
        ));
    }

    let entry = state
        .store()
        .upsert_watchlist_entry(user.user_id, &movie_id, &status)
        .await?;

    Ok((StatusCode::CREATED, Json(WatchlistEntryDto::from(entry))))
}

/// GET /watchlist/all/
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<WatchlistEntryDto>>, ApiError> {
    let entries = state.store().list_watchlist(user.user_id).await?;

    Ok(Json(
        entries.into_iter().map(WatchlistEntryDto::from).collect(),
    ))
}

/// DELETE /watchlist/{movie_id}/
pub async fn remove(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(movie_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .store()
        .remove_watchlist_entry(user.user_id, &movie_id)
        .await?;

    if !removed {
        return Err(ApiError::not_found("watchlist", movie_id));
    }

    Ok(Json(MessageResponse::new("Movie removed from watchlist")))
}

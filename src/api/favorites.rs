use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::{AddToListRequest, ApiError, AppState, ListEntryDto, MessageResponse};

/// POST /favorites/
/// Add a movie to the caller's favorites; re-adding returns the existing
/// entry.
pub async fn add(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<AddToListRequest>,
) -> Result<(StatusCode, Json<ListEntryDto>), ApiError> {
    let movie_id = payload
        .movie_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("movie_id is required"))?;

    let entry = state.store().add_favorite(user.user_id, &movie_id).await?;

    Ok((StatusCode::CREATED, Json(ListEntryDto::from(entry))))
}

/// GET /favorites/all/
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<ListEntryDto>>, ApiError> {
    let entries = state.store().list_favorites(user.user_id).await?;

    Ok(Json(entries.into_iter().map(ListEntryDto::from).collect()))
}

/// DELETE /favorites/{movie_id}/
pub async fn remove(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(movie_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .store()
        .remove_favorite(user.user_id, &movie_id)
        .await?;

    if !removed {
        return Err(ApiError::not_found("favorites", movie_id));
    }

    Ok(Json(MessageResponse::new("Movie removed from favorites")))
}

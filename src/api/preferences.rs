use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::{ApiError, AppState, MessageResponse, PreferenceDto, PreferenceStateDto,
    SetPreferenceRequest};

/// POST /preferences/
/// Set or update liked/disliked for a movie. liked and disliked are mutually
/// exclusive; the stored, normalized state is returned.
pub async fn set(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<SetPreferenceRequest>,
) -> Result<Json<PreferenceStateDto>, ApiError> {
    let movie_id = payload
        .movie_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("movie_id is required"))?;

    let pref = state
        .store()
        .set_preference(user.user_id, &movie_id, payload.liked, payload.disliked)
        .await?;

    Ok(Json(PreferenceStateDto {
        movie_id: pref.movie_id,
        liked: pref.liked,
        disliked: pref.disliked,
    }))
}

/// GET /preferences/all/
/// All of the caller's per-movie preferences.
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<PreferenceDto>>, ApiError> {
    let entries = state.store().list_preferences(user.user_id).await?;

    Ok(Json(entries.into_iter().map(PreferenceDto::from).collect()))
}

/// DELETE /preferences/{movie_id}/
pub async fn remove(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(movie_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .store()
        .remove_preference(user.user_id, &movie_id)
        .await?;

    if !removed {
        return Err(ApiError::NotFound("Preferences not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Preferences deleted successfully")))
}

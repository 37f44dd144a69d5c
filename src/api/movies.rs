use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::clients::tmdb::MovieDetails;
use crate::services::enrichment::EnrichedMovie;

/// GET /movies/popular/
/// Up to 50 popular movies enriched with details, cast, and trailer. Any
/// upstream failure aborts the whole batch.
pub async fn popular(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EnrichedMovie>>, ApiError> {
    let movies = state.enrichment.popular_with_details().await?;
    Ok(Json(movies))
}

/// GET /movies/search/{movie_id}/
/// Single-movie pass-through; a non-success upstream status is forwarded.
pub async fn get_movie_by_id(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> Result<Json<MovieDetails>, ApiError> {
    let details = state
        .tmdb()
        .get_movie_details(movie_id)
        .await
        .map_err(ApiError::forward_tmdb)?;

    Ok(Json(details))
}

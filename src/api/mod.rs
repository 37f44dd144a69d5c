use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::EnrichmentService;
use crate::state::SharedState;

pub mod auth;
mod error;
mod favorites;
mod history;
mod movies;
mod preferences;
mod types;
mod watchlist;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub enrichment: Arc<EnrichmentService>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn tmdb(&self) -> &Arc<crate::clients::tmdb::TmdbClient> {
        &self.shared.tmdb
    }
}

pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    let enrichment = Arc::new(EnrichmentService::new(shared.tmdb.clone()));

    Arc::new(AppState { shared, enrichment })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

/// One explicit (method, path) registration per operation; authentication is
/// enforced by the [`auth::AuthUser`] extractor on protected handlers.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/register/", post(auth::register))
        .route("/login/", post(auth::login))
        .route("/logout/", post(auth::logout))
        .route("/movies/popular/", get(movies::popular))
        .route("/movies/search/{movie_id}/", get(movies::get_movie_by_id))
        .route("/watchlist/", post(watchlist::add))
        .route("/watchlist/all/", get(watchlist::list))
        .route("/watchlist/{movie_id}/", delete(watchlist::remove))
        .route("/favorites/", post(favorites::add))
        .route("/favorites/all/", get(favorites::list))
        .route("/favorites/{movie_id}/", delete(favorites::remove))
        .route("/watchedhistory/", post(history::add))
        .route("/watchedhistory/all/", get(history::list))
        .route("/watchedhistory/{movie_id}/", delete(history::remove))
        .route("/preferences/", post(preferences::set))
        .route("/preferences/all/", get(preferences::list))
        .route("/preferences/{movie_id}/", delete(preferences::remove))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

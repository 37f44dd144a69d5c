use serde::{Deserialize, Serialize};

use crate::entities::{favorites, preferences, watched_history, watchlist_entries};

/// Error body shape returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WatchlistEntryDto {
    pub id: i32,
    pub movie_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<watchlist_entries::Model> for WatchlistEntryDto {
    fn from(model: watchlist_entries::Model) -> Self {
        Self {
            id: model.id,
            movie_id: model.movie_id,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListEntryDto {
    pub id: i32,
    pub movie_id: String,
    pub created_at: String,
}

impl From<favorites::Model> for ListEntryDto {
    fn from(model: favorites::Model) -> Self {
        Self {
            id: model.id,
            movie_id: model.movie_id,
            created_at: model.created_at,
        }
    }
}

impl From<watched_history::Model> for ListEntryDto {
    fn from(model: watched_history::Model) -> Self {
        Self {
            id: model.id,
            movie_id: model.movie_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferenceDto {
    pub id: i32,
    pub movie_id: String,
    pub liked: bool,
    pub disliked: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<preferences::Model> for PreferenceDto {
    fn from(model: preferences::Model) -> Self {
        Self {
            id: model.id,
            movie_id: model.movie_id,
            liked: model.liked,
            disliked: model.disliked,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Response for setting a preference: the normalized state.
#[derive(Debug, Serialize)]
pub struct PreferenceStateDto {
    pub movie_id: String,
    pub liked: bool,
    pub disliked: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddToListRequest {
    pub movie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    pub movie_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetPreferenceRequest {
    pub movie_id: Option<String>,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub disliked: bool,
}

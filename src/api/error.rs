use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::clients::tmdb::TmdbError;

use super::ErrorBody;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    Unauthorized(String),

    DatabaseError(String),

    InternalError(String),

    /// Upstream movie API failed (network, decode, or aggregation abort).
    Upstream(String),

    /// Upstream answered with a non-success status that is forwarded to the
    /// caller verbatim (single-movie lookup).
    UpstreamStatus { status: StatusCode, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
            ApiError::UpstreamStatus { status, message } => {
                write!(f, "Upstream returned {}: {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Upstream(msg) => {
                tracing::warn!("TMDB API error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::UpstreamStatus { status, message } => {
                tracing::warn!("TMDB returned {}: {}", status, message);
                (status, message)
            }
        };

        (status, Json(ErrorBody::new(error_message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl From<TmdbError> for ApiError {
    fn from(err: TmdbError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl ApiError {
    pub fn not_found(resource: &str, movie_id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("Movie {} not found in {}", movie_id, resource))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }

    /// Forward the upstream status for the single-movie lookup; other
    /// failures stay a 500.
    pub fn forward_tmdb(err: TmdbError) -> Self {
        match err {
            TmdbError::Status { status, message } => {
                let message = if message.is_empty() {
                    "Movie not found".to_string()
                } else {
                    message
                };
                ApiError::UpstreamStatus { status, message }
            }
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

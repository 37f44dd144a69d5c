use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TmdbConfig;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDB request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status. Carried separately so the
    /// single-movie lookup can forward the status to the caller.
    #[error("TMDB returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default = "Vec::new")]
    cast: Vec<CastMember>,
}

/// One row of a popular-movies listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub runtime: Option<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub key: String,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    #[must_use]
    pub const fn new(client: Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(url = %url, "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", "en-US"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TmdbError::Status { status, message });
        }

        Ok(response.json().await?)
    }

    /// One page (20 entries) of the popular-movies listing, upstream order.
    pub async fn get_popular_page(&self, page: u32) -> Result<Vec<MovieSummary>, TmdbError> {
        let response: PageResponse<MovieSummary> =
            self.get_json(&format!("/movie/popular?page={page}")).await?;
        Ok(response.results)
    }

    pub async fn get_movie_details(&self, movie_id: i64) -> Result<MovieDetails, TmdbError> {
        self.get_json(&format!("/movie/{movie_id}")).await
    }

    pub async fn get_credits(&self, movie_id: i64) -> Result<Vec<CastMember>, TmdbError> {
        let response: CreditsResponse =
            self.get_json(&format!("/movie/{movie_id}/credits")).await?;
        Ok(response.cast)
    }

    pub async fn get_videos(&self, movie_id: i64) -> Result<Vec<Video>, TmdbError> {
        let response: PageResponse<Video> =
            self.get_json(&format!("/movie/{movie_id}/videos")).await?;
        Ok(response.results)
    }

    /// Image URL for a TMDB image path, e.g. `image_url("w500", "/abc.jpg")`.
    #[must_use]
    pub fn image_url(&self, size: &str, path: &str) -> String {
        format!("{}/{size}{path}", self.config.image_base_url)
    }
}

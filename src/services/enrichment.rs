use std::sync::Arc;

use serde::Serialize;

use crate::clients::tmdb::{CastMember, MovieDetails, TmdbClient, TmdbError, Video};

/// Popularity pages fetched per aggregation (20 movies each).
const POPULAR_PAGES: u32 = 3;

/// Hard cap on enriched movies per response.
const MOVIE_LIMIT: usize = 50;

/// Cast members kept per movie, upstream order.
const CAST_LIMIT: usize = 5;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Denormalized, UI-ready movie record. Built fresh per request, never
/// persisted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMovie {
    pub id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub runtime: Option<i64>,
    pub genres: Vec<String>,
    pub overview: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub trailer: Option<String>,
    pub cast: Vec<EnrichedCastMember>,
}

#[derive(Debug, Serialize)]
pub struct EnrichedCastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub image: Option<String>,
}

/// First YouTube trailer in upstream order, as an embed URL.
fn select_trailer(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
        .map(|v| format!("{YOUTUBE_EMBED_BASE}{}", v.key))
}

pub struct EnrichmentService {
    tmdb: Arc<TmdbClient>,
}

impl EnrichmentService {
    #[must_use]
    pub const fn new(tmdb: Arc<TmdbClient>) -> Self {
        Self { tmdb }
    }

    /// Fetch the popular listing and enrich each movie with details, cast,
    /// and trailer.
    ///
    /// All upstream calls run strictly sequentially; the first failure aborts
    /// the whole aggregation with no partial result.
    pub async fn popular_with_details(&self) -> Result<Vec<EnrichedMovie>, TmdbError> {
        let mut summaries = Vec::new();
        for page in 1..=POPULAR_PAGES {
            summaries.extend(self.tmdb.get_popular_page(page).await?);
        }
        summaries.truncate(MOVIE_LIMIT);

        let mut enriched = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            let details = self.tmdb.get_movie_details(summary.id).await?;
            let credits = self.tmdb.get_credits(summary.id).await?;
            let videos = self.tmdb.get_videos(summary.id).await?;

            enriched.push(self.assemble(details, &credits, &videos));
        }

        tracing::debug!(count = enriched.len(), "Assembled enriched popular movies");

        Ok(enriched)
    }

    fn assemble(
        &self,
        details: MovieDetails,
        credits: &[CastMember],
        videos: &[Video],
    ) -> EnrichedMovie {
        EnrichedMovie {
            id: details.id,
            title: details.title,
            release_date: details.release_date,
            rating: details.vote_average,
            runtime: details.runtime,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            overview: details.overview,
            poster: details
                .poster_path
                .as_deref()
                .map(|p| self.tmdb.image_url("w500", p)),
            backdrop: details
                .backdrop_path
                .as_deref()
                .map(|p| self.tmdb.image_url("original", p)),
            trailer: select_trailer(videos),
            cast: self.build_cast(credits),
        }
    }

    fn build_cast(&self, credits: &[CastMember]) -> Vec<EnrichedCastMember> {
        credits
            .iter()
            .take(CAST_LIMIT)
            .map(|c| EnrichedCastMember {
                id: c.id,
                name: c.name.clone(),
                character: c.character.clone(),
                image: c
                    .profile_path
                    .as_deref()
                    .map(|p| self.tmdb.image_url("w200", p)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::tmdb::Genre;
    use crate::config::TmdbConfig;

    fn test_service() -> EnrichmentService {
        let client = TmdbClient::new(reqwest::Client::new(), TmdbConfig::default());
        EnrichmentService::new(Arc::new(client))
    }

    fn video(site: &str, video_type: &str, key: &str) -> Video {
        Video {
            site: site.to_string(),
            video_type: video_type.to_string(),
            key: key.to_string(),
        }
    }

    fn cast_member(id: i64, profile_path: Option<&str>) -> CastMember {
        CastMember {
            id,
            name: format!("Actor {id}"),
            character: Some(format!("Role {id}")),
            profile_path: profile_path.map(String::from),
        }
    }

    #[test]
    fn trailer_is_first_youtube_trailer() {
        let videos = vec![
            video("YouTube", "Teaser", "skip1"),
            video("Vimeo", "Trailer", "skip2"),
            video("YouTube", "Trailer", "abc123"),
            video("YouTube", "Trailer", "later"),
        ];

        assert_eq!(
            select_trailer(&videos),
            Some("https://www.youtube.com/embed/abc123".to_string())
        );
    }

    #[test]
    fn missing_trailer_yields_none() {
        assert_eq!(select_trailer(&[]), None);

        let videos = vec![video("YouTube", "Clip", "x"), video("Vimeo", "Trailer", "y")];
        assert_eq!(select_trailer(&videos), None);
    }

    #[test]
    fn cast_is_truncated_to_five() {
        let service = test_service();
        let credits: Vec<CastMember> = (1..=8).map(|i| cast_member(i, Some("/p.jpg"))).collect();

        let cast = service.build_cast(&credits);
        assert_eq!(cast.len(), 5);
        assert_eq!(cast[0].id, 1);
        assert_eq!(cast[4].id, 5);
    }

    #[test]
    fn cast_image_only_when_profile_path_present() {
        let service = test_service();
        let credits = vec![cast_member(1, Some("/face.jpg")), cast_member(2, None)];

        let cast = service.build_cast(&credits);
        assert_eq!(
            cast[0].image.as_deref(),
            Some("https://image.tmdb.org/t/p/w200/face.jpg")
        );
        assert!(cast[1].image.is_none());
    }

    #[test]
    fn assemble_builds_urls_only_when_paths_present() {
        let service = test_service();
        let details = MovieDetails {
            id: 550,
            title: "Fight Club".to_string(),
            release_date: Some("1999-10-15".to_string()),
            vote_average: Some(8.4),
            runtime: Some(139),
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            overview: Some("An insomniac office worker...".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
        };

        let movie = service.assemble(details, &[], &[]);
        assert_eq!(
            movie.poster.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert!(movie.backdrop.is_none());
        assert!(movie.trailer.is_none());
        assert_eq!(movie.genres, vec!["Drama".to_string()]);
        assert!(movie.cast.is_empty());
    }
}

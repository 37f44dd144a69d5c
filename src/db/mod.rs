use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;
pub use repositories::watchlist::DEFAULT_STATUS;

use crate::entities::{favorites, preferences, sessions, watched_history, watchlist_entries};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // An in-memory SQLite database exists per connection; a single
        // connection keeps migrations and queries on the same database.
        let max_connections = if db_url.contains(":memory:") {
            1
        } else {
            max_connections
        };

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn session_repo(&self) -> repositories::session::SessionRepository {
        repositories::session::SessionRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn preference_repo(&self) -> repositories::preference::PreferenceRepository {
        repositories::preference::PreferenceRepository::new(self.conn.clone())
    }

    // ----- users -----

    pub async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<User> {
        self.user_repo().create(username, email, password).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn find_user_for_login(&self, identifier: &str) -> Result<Option<(User, String)>> {
        self.user_repo().find_for_login(identifier).await
    }

    // ----- sessions -----

    pub async fn create_session(
        &self,
        user_id: i32,
        refresh_token_hash: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<sessions::Model> {
        self.session_repo()
            .create(user_id, refresh_token_hash, expires_at)
            .await
    }

    pub async fn find_active_session(&self, token_hash: &str) -> Result<Option<sessions::Model>> {
        self.session_repo().find_active_by_hash(token_hash).await
    }

    pub async fn revoke_session(&self, session_id: i32) -> Result<()> {
        self.session_repo().revoke(session_id).await
    }

    // ----- watchlist -----

    pub async fn upsert_watchlist_entry(
        &self,
        user_id: i32,
        movie_id: &str,
        status: &str,
    ) -> Result<watchlist_entries::Model> {
        self.watchlist_repo().upsert(user_id, movie_id, status).await
    }

    pub async fn list_watchlist(&self, user_id: i32) -> Result<Vec<watchlist_entries::Model>> {
        self.watchlist_repo().list(user_id).await
    }

    pub async fn remove_watchlist_entry(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        self.watchlist_repo().remove(user_id, movie_id).await
    }

    // ----- favorites -----

    pub async fn add_favorite(&self, user_id: i32, movie_id: &str) -> Result<favorites::Model> {
        self.favorite_repo().add(user_id, movie_id).await
    }

    pub async fn list_favorites(&self, user_id: i32) -> Result<Vec<favorites::Model>> {
        self.favorite_repo().list(user_id).await
    }

    pub async fn remove_favorite(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        self.favorite_repo().remove(user_id, movie_id).await
    }

    // ----- watched history -----

    pub async fn add_watched(&self, user_id: i32, movie_id: &str) -> Result<watched_history::Model> {
        self.history_repo().add(user_id, movie_id).await
    }

    pub async fn list_watched(&self, user_id: i32) -> Result<Vec<watched_history::Model>> {
        self.history_repo().list(user_id).await
    }

    pub async fn remove_watched(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        self.history_repo().remove(user_id, movie_id).await
    }

    // ----- preferences -----

    pub async fn set_preference(
        &self,
        user_id: i32,
        movie_id: &str,
        liked: bool,
        disliked: bool,
    ) -> Result<preferences::Model> {
        self.preference_repo()
            .set(user_id, movie_id, liked, disliked)
            .await
    }

    pub async fn list_preferences(&self, user_id: i32) -> Result<Vec<preferences::Model>> {
        self.preference_repo().list(user_id).await
    }

    pub async fn remove_preference(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        self.preference_repo().remove(user_id, movie_id).await
    }
}

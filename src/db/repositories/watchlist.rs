use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::watchlist_entries;

/// Default status for a newly added watchlist entry.
pub const DEFAULT_STATUS: &str = "to_watch";

pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Add a movie to the user's watchlist, or update the status of the
    /// existing entry. One row per (user, movie).
    pub async fn upsert(
        &self,
        user_id: i32,
        movie_id: &str,
        status: &str,
    ) -> Result<watchlist_entries::Model> {
        let existing = watchlist_entries::Entity::find()
            .filter(watchlist_entries::Column::UserId.eq(user_id))
            .filter(watchlist_entries::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query watchlist entry")?;

        let now = chrono::Utc::now().to_rfc3339();

        let model = if let Some(entry) = existing {
            let mut active: watchlist_entries::ActiveModel = entry.into();
            active.status = Set(status.to_string());
            active.updated_at = Set(now);
            active.update(&self.conn).await?
        } else {
            let active = watchlist_entries::ActiveModel {
                user_id: Set(user_id),
                movie_id: Set(movie_id.to_string()),
                status: Set(status.to_string()),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            };
            active.insert(&self.conn).await?
        };

        Ok(model)
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<watchlist_entries::Model>> {
        let entries = watchlist_entries::Entity::find()
            .filter(watchlist_entries::Column::UserId.eq(user_id))
            .order_by_asc(watchlist_entries::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list watchlist entries")?;

        Ok(entries)
    }

    /// Remove a movie from the user's watchlist. Returns false when no entry
    /// existed for (user, movie).
    pub async fn remove(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        let entry = watchlist_entries::Entity::find()
            .filter(watchlist_entries::Column::UserId.eq(user_id))
            .filter(watchlist_entries::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query watchlist entry for removal")?;

        let Some(entry) = entry else {
            return Ok(false);
        };

        entry.delete(&self.conn).await?;
        Ok(true)
    }
}

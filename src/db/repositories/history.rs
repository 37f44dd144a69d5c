use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::watched_history;

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Mark a movie as watched. Re-adding returns the existing row unchanged.
    pub async fn add(&self, user_id: i32, movie_id: &str) -> Result<watched_history::Model> {
        let existing = watched_history::Entity::find()
            .filter(watched_history::Column::UserId.eq(user_id))
            .filter(watched_history::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query watched history entry")?;

        if let Some(entry) = existing {
            return Ok(entry);
        }

        let active = watched_history::ActiveModel {
            user_id: Set(user_id),
            movie_id: Set(movie_id.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        Ok(active.insert(&self.conn).await?)
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<watched_history::Model>> {
        let entries = watched_history::Entity::find()
            .filter(watched_history::Column::UserId.eq(user_id))
            .order_by_asc(watched_history::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list watched history")?;

        Ok(entries)
    }

    pub async fn remove(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        let entry = watched_history::Entity::find()
            .filter(watched_history::Column::UserId.eq(user_id))
            .filter(watched_history::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query watched history entry for removal")?;

        let Some(entry) = entry else {
            return Ok(false);
        };

        entry.delete(&self.conn).await?;
        Ok(true)
    }
}

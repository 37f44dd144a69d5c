use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::favorites;

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Add a movie to the user's favorites. Re-adding returns the existing
    /// row unchanged.
    pub async fn add(&self, user_id: i32, movie_id: &str) -> Result<favorites::Model> {
        let existing = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query favorite")?;

        if let Some(favorite) = existing {
            return Ok(favorite);
        }

        let active = favorites::ActiveModel {
            user_id: Set(user_id),
            movie_id: Set(movie_id.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        Ok(active.insert(&self.conn).await?)
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<favorites::Model>> {
        let entries = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_asc(favorites::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list favorites")?;

        Ok(entries)
    }

    pub async fn remove(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        let entry = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query favorite for removal")?;

        let Some(entry) = entry else {
            return Ok(false);
        };

        entry.delete(&self.conn).await?;
        Ok(true)
    }
}

use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::preferences;

/// Force liked/disliked into a mutually exclusive pair. Both false is the
/// valid "opinion cleared" state.
#[must_use]
pub const fn normalize(liked: bool, disliked: bool) -> (bool, bool) {
    if liked {
        (true, false)
    } else if disliked {
        (false, true)
    } else {
        (false, false)
    }
}

pub struct PreferenceRepository {
    conn: DatabaseConnection,
}

impl PreferenceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Set or update the liked/disliked state for (user, movie).
    pub async fn set(
        &self,
        user_id: i32,
        movie_id: &str,
        liked: bool,
        disliked: bool,
    ) -> Result<preferences::Model> {
        let (liked, disliked) = normalize(liked, disliked);

        let existing = preferences::Entity::find()
            .filter(preferences::Column::UserId.eq(user_id))
            .filter(preferences::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query preference")?;

        let now = chrono::Utc::now().to_rfc3339();

        let model = if let Some(pref) = existing {
            let mut active: preferences::ActiveModel = pref.into();
            active.liked = Set(liked);
            active.disliked = Set(disliked);
            active.updated_at = Set(now);
            active.update(&self.conn).await?
        } else {
            let active = preferences::ActiveModel {
                user_id: Set(user_id),
                movie_id: Set(movie_id.to_string()),
                liked: Set(liked),
                disliked: Set(disliked),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            };
            active.insert(&self.conn).await?
        };

        Ok(model)
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<preferences::Model>> {
        let entries = preferences::Entity::find()
            .filter(preferences::Column::UserId.eq(user_id))
            .order_by_asc(preferences::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list preferences")?;

        Ok(entries)
    }

    pub async fn remove(&self, user_id: i32, movie_id: &str) -> Result<bool> {
        let entry = preferences::Entity::find()
            .filter(preferences::Column::UserId.eq(user_id))
            .filter(preferences::Column::MovieId.eq(movie_id))
            .one(&self.conn)
            .await
            .context("Failed to query preference for removal")?;

        let Some(entry) = entry else {
            return Ok(false);
        };

        entry.delete(&self.conn).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn liked_wins_over_disliked() {
        assert_eq!(normalize(true, true), (true, false));
        assert_eq!(normalize(true, false), (true, false));
    }

    #[test]
    fn disliked_clears_liked() {
        assert_eq!(normalize(false, true), (false, true));
    }

    #[test]
    fn both_false_is_cleared_state() {
        assert_eq!(normalize(false, false), (false, false));
    }
}

use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::sessions;

pub struct SessionRepository {
    conn: DatabaseConnection,
}

impl SessionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Persist a new refresh-token session. Only the token hash is stored.
    pub async fn create(
        &self,
        user_id: i32,
        refresh_token_hash: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<sessions::Model> {
        let active = sessions::ActiveModel {
            user_id: Set(user_id),
            refresh_token_hash: Set(refresh_token_hash.to_string()),
            expires_at: Set(expires_at.to_rfc3339()),
            revoked: Set(false),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert session")?;

        Ok(model)
    }

    /// Find the live session matching a refresh-token hash. Revoked or
    /// expired sessions are treated as absent.
    pub async fn find_active_by_hash(&self, token_hash: &str) -> Result<Option<sessions::Model>> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::RefreshTokenHash.eq(token_hash))
            .filter(sessions::Column::Revoked.eq(false))
            .one(&self.conn)
            .await
            .context("Failed to query session by token hash")?;

        let Some(session) = session else {
            return Ok(None);
        };

        let expired = chrono::DateTime::parse_from_rfc3339(&session.expires_at)
            .map(|t| t < chrono::Utc::now())
            .unwrap_or(true);

        if expired {
            return Ok(None);
        }

        Ok(Some(session))
    }

    pub async fn revoke(&self, session_id: i32) -> Result<()> {
        let session = sessions::Entity::find_by_id(session_id)
            .one(&self.conn)
            .await
            .context("Failed to query session for revocation")?
            .ok_or_else(|| anyhow::anyhow!("Session not found: {session_id}"))?;

        let mut active: sessions::ActiveModel = session.into();
        active.revoked = Set(true);
        active.update(&self.conn).await?;

        Ok(())
    }
}

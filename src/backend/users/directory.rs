/**
 * User Directory
 *
 * Resolves a caller-supplied telegram id to the stored user profile. The
 * wider registration/rating surface is out of scope; the competition core
 * only needs identity, display name, and avatar.
 */
use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;

use crate::backend::error::BackendResult;

/// The slice of a user the competition core needs.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    /// Internal id, referenced by participant rows.
    pub id: i32,
    pub telegram_id: i64,
    pub username: String,
    pub photo_url: Option<String>,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user by telegram id; `None` when unknown.
    async fn resolve(&self, telegram_id: i64) -> BackendResult<Option<UserProfile>>;
}

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn resolve(&self, telegram_id: i64) -> BackendResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, telegram_id, username, photo_url
            FROM users
            WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ticket_core::{RepoResult, User, UserProfile, UserRepository};

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, discord_id, username, avatar, is_staff, last_seen_at, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, profile), fields(discord_id = %profile.discord_id))]
    async fn upsert(&self, profile: &UserProfile) -> RepoResult<User> {
        // A missing avatar on a later interaction keeps the stored one
        let result = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (discord_id, username, avatar, is_staff, last_seen_at, created_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (discord_id) DO UPDATE SET
                username = $2,
                avatar = COALESCE($3, users.avatar),
                is_staff = $4,
                last_seen_at = NOW()
            RETURNING id, discord_id, username, avatar, is_staff, last_seen_at, created_at
            ",
        )
        .bind(profile.discord_id.into_inner())
        .bind(&profile.username)
        .bind(&profile.avatar)
        .bind(profile.is_staff)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(User::from(result))
    }
}

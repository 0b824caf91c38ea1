//! PostgreSQL implementation of SettingsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ticket_core::entities::DEFAULT_PREFIX;
use ticket_core::{GuildSettings, RepoResult, SettingsMutation, SettingsRepository, Snowflake};

use crate::models::GuildSettingsModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SettingsRepository
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new PgSettingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    #[instrument(skip(self))]
    async fn find_or_default(&self, guild_id: Snowflake) -> RepoResult<GuildSettings> {
        let result = sqlx::query_as::<_, GuildSettingsModel>(
            r"
            INSERT INTO guild_settings (guild_id, prefix, last_ticket_number, updated_at)
            VALUES ($1, $2, 0, NOW())
            ON CONFLICT (guild_id) DO UPDATE SET guild_id = EXCLUDED.guild_id
            RETURNING guild_id, prefix, staff_role_id, last_ticket_number, log_channel_id,
                      panel_channel_id, panel_message_id, updated_at
            ",
        )
        .bind(guild_id.into_inner())
        .bind(DEFAULT_PREFIX)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(GuildSettings::from(result))
    }

    #[instrument(skip(self, patch))]
    async fn upsert(
        &self,
        guild_id: Snowflake,
        patch: SettingsMutation,
    ) -> RepoResult<GuildSettings> {
        let (panel_channel_id, panel_message_id) = match patch.panel {
            Some((channel, message)) => (Some(channel.into_inner()), Some(message.into_inner())),
            None => (None, None),
        };

        let result = sqlx::query_as::<_, GuildSettingsModel>(
            r"
            INSERT INTO guild_settings (guild_id, prefix, staff_role_id, log_channel_id,
                                        panel_channel_id, panel_message_id, last_ticket_number,
                                        updated_at)
            VALUES ($1, COALESCE($2, $7), $3, $4, $5, $6, 0, NOW())
            ON CONFLICT (guild_id) DO UPDATE SET
                prefix = COALESCE($2, guild_settings.prefix),
                staff_role_id = COALESCE($3, guild_settings.staff_role_id),
                log_channel_id = COALESCE($4, guild_settings.log_channel_id),
                panel_channel_id = COALESCE($5, guild_settings.panel_channel_id),
                panel_message_id = COALESCE($6, guild_settings.panel_message_id),
                updated_at = NOW()
            RETURNING guild_id, prefix, staff_role_id, last_ticket_number, log_channel_id,
                      panel_channel_id, panel_message_id, updated_at
            ",
        )
        .bind(guild_id.into_inner())
        .bind(&patch.prefix)
        .bind(patch.staff_role_id.map(Snowflake::into_inner))
        .bind(patch.log_channel_id.map(Snowflake::into_inner))
        .bind(panel_channel_id)
        .bind(panel_message_id)
        .bind(DEFAULT_PREFIX)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(GuildSettings::from(result))
    }

    #[instrument(skip(self))]
    async fn next_ticket_number(&self, guild_id: Snowflake) -> RepoResult<i32> {
        // Read-increment-store in a single statement; concurrent callers
        // serialize on the row and each sees a distinct value
        let number = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO guild_settings (guild_id, prefix, last_ticket_number, updated_at)
            VALUES ($1, $2, 1, NOW())
            ON CONFLICT (guild_id) DO UPDATE SET
                last_ticket_number = guild_settings.last_ticket_number + 1,
                updated_at = NOW()
            RETURNING last_ticket_number
            ",
        )
        .bind(guild_id.into_inner())
        .bind(DEFAULT_PREFIX)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(number)
    }
}

//! Per-guild configuration service
//!
//! Admin-facing settings writes. Each setter is a partial upsert so a guild
//! can be configured in any order, starting from defaults on first touch.

use tracing::{info, instrument};
use validator::Validate;

use ticket_core::{SettingsMutation, Snowflake};

use crate::dto::{SetPrefixRequest, SettingsView};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Guild configuration service
pub struct GuildConfigService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildConfigService<'a> {
    /// Create a new GuildConfigService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current settings, created with defaults on first access
    #[instrument(skip(self))]
    pub async fn get_settings(&self, guild_id: Snowflake) -> ServiceResult<SettingsView> {
        let settings = self.ctx.settings_repo().find_or_default(guild_id).await?;
        Ok(SettingsView::from(&settings))
    }

    /// Change the command prefix
    #[instrument(skip(self, request))]
    pub async fn set_prefix(
        &self,
        guild_id: Snowflake,
        request: SetPrefixRequest,
    ) -> ServiceResult<SettingsView> {
        request
            .validate()
            .map_err(|e| ServiceError::from_validation_errors(&e))?;

        let settings = self
            .ctx
            .settings_repo()
            .upsert(
                guild_id,
                SettingsMutation {
                    prefix: Some(request.prefix.trim().to_string()),
                    ..SettingsMutation::default()
                },
            )
            .await?;
        info!(%guild_id, prefix = %settings.prefix, "Prefix updated");
        Ok(SettingsView::from(&settings))
    }

    /// Designate the staff role
    #[instrument(skip(self))]
    pub async fn set_staff_role(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<SettingsView> {
        let settings = self
            .ctx
            .settings_repo()
            .upsert(
                guild_id,
                SettingsMutation {
                    staff_role_id: Some(role_id),
                    ..SettingsMutation::default()
                },
            )
            .await?;
        info!(%guild_id, %role_id, "Staff role updated");
        Ok(SettingsView::from(&settings))
    }

    /// Designate the lifecycle log channel
    #[instrument(skip(self))]
    pub async fn set_log_channel(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<SettingsView> {
        let settings = self
            .ctx
            .settings_repo()
            .upsert(
                guild_id,
                SettingsMutation {
                    log_channel_id: Some(channel_id),
                    ..SettingsMutation::default()
                },
            )
            .await?;
        info!(%guild_id, %channel_id, "Log channel updated");
        Ok(SettingsView::from(&settings))
    }

    /// Record where the ticket panel message lives, channel and message
    /// together so a stale pair never survives a move
    #[instrument(skip(self))]
    pub async fn set_panel(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<SettingsView> {
        let settings = self
            .ctx
            .settings_repo()
            .upsert(
                guild_id,
                SettingsMutation {
                    panel: Some((channel_id, message_id)),
                    ..SettingsMutation::default()
                },
            )
            .await?;
        info!(%guild_id, %channel_id, %message_id, "Panel recorded");
        Ok(SettingsView::from(&settings))
    }
}

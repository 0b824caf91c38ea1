//! Channel binding service
//!
//! Creates the private ticket channel on the platform and records the
//! binding. The persisted ticket is the durable truth; a crash between
//! channel creation and `bind_channel` is repaired by the reconciliation
//! sweep, never by rolling the ticket back.

use tracing::{info, instrument, warn};

use ticket_core::{ChannelOverwrite, GuildSettings, Snowflake, Ticket, User};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel binding service
pub struct BindingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BindingService<'a> {
    /// Create a new BindingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn overwrites(
        ticket: &Ticket,
        creator_discord_id: Snowflake,
        settings: &GuildSettings,
        bot_user_id: Option<Snowflake>,
    ) -> Vec<ChannelOverwrite> {
        // The @everyone role id equals the guild id on Discord
        let mut overwrites = vec![
            ChannelOverwrite::deny_view(ticket.guild_id),
            ChannelOverwrite::allow_participant(creator_discord_id),
        ];
        if let Some(staff_role) = settings.staff_role_id {
            overwrites.push(ChannelOverwrite::allow_participant(staff_role));
        }
        if let Some(bot_id) = bot_user_id {
            overwrites.push(ChannelOverwrite::allow_bot(bot_id));
        }
        overwrites
    }

    /// Create the private channel (bounded retries, same reserved number)
    /// and record the binding, then post the welcome and a random
    /// auto-reply best-effort
    #[instrument(skip(self, ticket, settings), fields(ticket_id = ticket.id))]
    pub async fn bind(
        &self,
        ticket: &Ticket,
        creator: &User,
        settings: &GuildSettings,
    ) -> ServiceResult<Ticket> {
        let name = ticket.channel_name();
        let overwrites =
            Self::overwrites(ticket, creator.discord_id, settings, self.ctx.bot().bot_user_id);

        let retries = self.ctx.bot().channel_create_retries.max(1);
        let mut channel_id = None;
        let mut last_err = None;
        for attempt in 1..=retries {
            match self
                .ctx
                .platform()
                .create_private_channel(ticket.guild_id, &name, &overwrites)
                .await
            {
                Ok(id) => {
                    channel_id = Some(id);
                    break;
                }
                Err(e) => {
                    warn!(ticket_id = ticket.id, attempt, error = %e, "Channel creation failed");
                    last_err = Some(e);
                }
            }
        }

        let Some(channel_id) = channel_id else {
            return Err(last_err.map_or_else(
                || ServiceError::internal("channel creation failed without error"),
                ServiceError::from,
            ));
        };

        let bound = self
            .ctx
            .ticket_repo()
            .bind_channel(ticket.id, channel_id)
            .await?;
        info!(ticket_id = ticket.id, channel_id = %channel_id, "Ticket channel bound");

        self.post_welcome(&bound, creator).await;
        Ok(bound)
    }

    /// Delete the bound channel, fire-and-forget with logged failure
    #[instrument(skip(self, ticket), fields(ticket_id = ticket.id))]
    pub async fn unbind(&self, ticket: &Ticket) {
        let Some(channel_id) = ticket.channel_id else {
            return;
        };
        if let Err(e) = self.ctx.platform().delete_channel(channel_id).await {
            warn!(ticket_id = ticket.id, channel_id = %channel_id, error = %e, "Channel deletion failed");
        }
    }

    /// Welcome message plus a random canned quip, both best-effort
    async fn post_welcome(&self, ticket: &Ticket, creator: &User) {
        let Some(channel_id) = ticket.channel_id else {
            return;
        };

        let welcome = self.ctx.presenter().message(&format!(
            "Welcome {}! Ticket #{} is open: {}",
            creator.username, ticket.number, ticket.description
        ));
        if let Err(e) = self
            .ctx
            .platform()
            .send_channel_message(channel_id, &welcome)
            .await
        {
            warn!(ticket_id = ticket.id, error = %e, "Welcome message failed");
        }

        match self.ctx.auto_reply_repo().random().await {
            Ok(Some(reply)) => {
                let payload = self.ctx.presenter().message(&reply.content);
                if let Err(e) = self
                    .ctx
                    .platform()
                    .send_channel_message(channel_id, &payload)
                    .await
                {
                    warn!(ticket_id = ticket.id, error = %e, "Auto-reply failed");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Auto-reply lookup failed"),
        }
    }
}

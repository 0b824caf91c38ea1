//! Action dispatcher
//!
//! Single entry point between the gateway and the services. Every incoming
//! interaction becomes an [`Action`]; the dispatcher resolves the acting
//! user, enforces the cooldown window and authorization, routes to the
//! right service, and renders the outcome. Errors become user-facing
//! payloads here and nowhere else.

use std::sync::Arc;

use tracing::{info, instrument};

use ticket_core::{Snowflake, Ticket, UserProfile};

use crate::dto::{OpenTicketRequest, SetPrefixRequest};
use crate::presenter::RenderPayload;

use super::catalog::CatalogService;
use super::config::GuildConfigService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::lifecycle::TicketService;
use super::prompts::PromptKind;

// ============================================================================
// Actor and actions
// ============================================================================

/// Who is acting, and from where
///
/// Everything here comes straight off the incoming interaction; the
/// dispatcher derives staff standing from the guild settings itself.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub user_id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
    /// Platform administrator permission, resolved by the gateway
    pub is_admin: bool,
    /// Role ids the actor carries in this guild
    pub roles: Vec<Snowflake>,
}

/// A decoded interaction
///
/// Channel-scoped actions (`Accept`, `Close`, `Reply`, `TicketLog`) resolve
/// their ticket from the channel the actor spoke in.
#[derive(Debug, Clone)]
pub enum Action {
    OpenTicket { category_id: i64, description: String },
    ListCategories,
    Accept,
    BeginReject,
    SubmitInput { content: String },
    Close,
    Reply { message: String },
    RetryBinding { ticket_id: i64 },
    ListMine,
    TicketLog,
    SetPrefix { prefix: String },
    SetStaffRole { role_id: Snowflake },
    SetLogChannel { channel_id: Snowflake },
    SetPanel { channel_id: Snowflake, message_id: Snowflake },
}

impl Action {
    /// Stable name used for cooldown keying and permission messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OpenTicket { .. } => "open_ticket",
            Self::ListCategories => "list_categories",
            Self::Accept => "accept",
            Self::BeginReject => "reject",
            Self::SubmitInput { .. } => "submit_input",
            Self::Close => "close",
            Self::Reply { .. } => "reply",
            Self::RetryBinding { .. } => "retry_binding",
            Self::ListMine => "list_mine",
            Self::TicketLog => "ticket_log",
            Self::SetPrefix { .. } => "set_prefix",
            Self::SetStaffRole { .. } => "set_staff_role",
            Self::SetLogChannel { .. } => "set_log_channel",
            Self::SetPanel { .. } => "set_panel",
        }
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Routes actions to services behind authorization and de-duplication
pub struct Dispatcher {
    ctx: Arc<ServiceContext>,
}

impl Dispatcher {
    /// Create a new Dispatcher
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Dispatch one action for one actor
    #[instrument(skip(self, actor, action), fields(user_id = %actor.user_id, action = action.kind()))]
    pub async fn dispatch(
        &self,
        actor: &ActorContext,
        action: Action,
    ) -> ServiceResult<RenderPayload> {
        let settings = self
            .ctx
            .settings_repo()
            .find_or_default(actor.guild_id)
            .await?;
        let is_staff = actor.is_admin || settings.is_staff_role(&actor.roles);

        let user = super::identity::IdentityService::new(&self.ctx)
            .resolve_user(&UserProfile {
                discord_id: actor.user_id,
                username: actor.username.clone(),
                avatar: actor.avatar.clone(),
                is_staff,
            })
            .await?;

        // Awaited input is the continuation of an action already admitted
        // through the gate, so it is never rate-limited itself.
        if !matches!(action, Action::SubmitInput { .. }) {
            self.ctx
                .cooldowns()
                .check(actor.user_id, actor.channel_id, action.kind())?;
        }

        match action {
            Action::OpenTicket {
                category_id,
                description,
            } => {
                let created = TicketService::new(&self.ctx)
                    .create_ticket(
                        &user,
                        actor.guild_id,
                        OpenTicketRequest {
                            category_id,
                            description,
                        },
                    )
                    .await?;
                Ok(self.ctx.presenter().created(&created))
            }

            Action::ListCategories => {
                let categories = CatalogService::new(&self.ctx).list_categories().await?;
                let lines: Vec<String> = categories
                    .iter()
                    .map(|c| match &c.description {
                        Some(desc) => format!("{} {} - {}", c.emoji, c.name, desc),
                        None => format!("{} {}", c.emoji, c.name),
                    })
                    .collect();
                Ok(self.ctx.presenter().message(&lines.join("\n")))
            }

            Action::Accept => {
                let ticket = self.ticket_in_channel(actor.channel_id).await?;
                Self::authorize(is_staff, "accept")?;
                let view = TicketService::new(&self.ctx).accept(ticket.id, &user).await?;
                Ok(self.ctx.presenter().ticket(&view))
            }

            Action::BeginReject => {
                let ticket = self.ticket_in_channel(actor.channel_id).await?;
                Self::authorize(is_staff, "reject")?;
                self.ctx.prompts().begin(
                    actor.user_id,
                    actor.channel_id,
                    PromptKind::RejectReason {
                        ticket_id: ticket.id,
                    },
                );
                info!(ticket_id = ticket.id, "Reject prompt opened");
                Ok(self.ctx.presenter().message(&format!(
                    "Reply with the rejection reason within {} seconds.",
                    self.ctx.bot().prompt_timeout_seconds
                )))
            }

            Action::SubmitInput { content } => {
                match self.ctx.prompts().take(actor.user_id, actor.channel_id)? {
                    Some(PromptKind::RejectReason { ticket_id }) => {
                        Self::authorize(is_staff, "reject")?;
                        let view = TicketService::new(&self.ctx)
                            .reject(ticket_id, &user, content.trim())
                            .await?;
                        Ok(self.ctx.presenter().ticket(&view))
                    }
                    None => Err(ServiceError::not_found(
                        "Prompt",
                        format!("{}:{}", actor.user_id, actor.channel_id),
                    )),
                }
            }

            Action::Close => {
                let ticket = self.ticket_in_channel(actor.channel_id).await?;
                Self::authorize(is_staff || ticket.is_creator(user.id), "close")?;
                let view = TicketService::new(&self.ctx).close(ticket.id, &user).await?;
                Ok(self.ctx.presenter().ticket(&view))
            }

            Action::Reply { message } => {
                let ticket = self.ticket_in_channel(actor.channel_id).await?;
                Self::authorize(is_staff || ticket.is_creator(user.id), "reply")?;
                TicketService::new(&self.ctx)
                    .add_response(ticket.id, &user, message.trim())
                    .await?;
                Ok(self
                    .ctx
                    .presenter()
                    .message(&format!("Reply added to ticket #{}.", ticket.number)))
            }

            Action::RetryBinding { ticket_id } => {
                Self::authorize(is_staff, "retry_binding")?;
                let view = TicketService::new(&self.ctx).retry_binding(ticket_id).await?;
                Ok(self.ctx.presenter().ticket(&view))
            }

            Action::ListMine => {
                let views = TicketService::new(&self.ctx).list_for_user(&user).await?;
                Ok(self.ctx.presenter().ticket_list(&views))
            }

            Action::TicketLog => {
                let ticket = self.ticket_in_channel(actor.channel_id).await?;
                Self::authorize(is_staff || ticket.is_creator(user.id), "ticket_log")?;
                let log = TicketService::new(&self.ctx).ticket_log(ticket.id).await?;
                Ok(self.ctx.presenter().ticket_log(&log))
            }

            Action::SetPrefix { prefix } => {
                Self::authorize(actor.is_admin, "set_prefix")?;
                let view = GuildConfigService::new(&self.ctx)
                    .set_prefix(actor.guild_id, SetPrefixRequest { prefix })
                    .await?;
                Ok(self
                    .ctx
                    .presenter()
                    .message(&format!("Prefix set to `{}`.", view.prefix)))
            }

            Action::SetStaffRole { role_id } => {
                Self::authorize(actor.is_admin, "set_staff_role")?;
                GuildConfigService::new(&self.ctx)
                    .set_staff_role(actor.guild_id, role_id)
                    .await?;
                Ok(self
                    .ctx
                    .presenter()
                    .message(&format!("Staff role set to {role_id}.")))
            }

            Action::SetLogChannel { channel_id } => {
                Self::authorize(actor.is_admin, "set_log_channel")?;
                GuildConfigService::new(&self.ctx)
                    .set_log_channel(actor.guild_id, channel_id)
                    .await?;
                Ok(self
                    .ctx
                    .presenter()
                    .message(&format!("Log channel set to {channel_id}.")))
            }

            Action::SetPanel {
                channel_id,
                message_id,
            } => {
                Self::authorize(actor.is_admin, "set_panel")?;
                GuildConfigService::new(&self.ctx)
                    .set_panel(actor.guild_id, channel_id, message_id)
                    .await?;
                Ok(self.ctx.presenter().message("Ticket panel recorded."))
            }
        }
    }

    /// Render an error the way the configured presenter does
    pub fn render_error(&self, err: &ServiceError) -> RenderPayload {
        self.ctx.presenter().error(err)
    }

    /// Whether the actor has an awaited-input prompt open in this channel
    pub fn awaits_input(&self, actor: &ActorContext) -> bool {
        self.ctx
            .prompts()
            .peek(actor.user_id, actor.channel_id)
    }

    async fn ticket_in_channel(&self, channel_id: Snowflake) -> ServiceResult<Ticket> {
        TicketService::new(&self.ctx).get_by_channel(channel_id).await
    }

    fn authorize(allowed: bool, action: &'static str) -> ServiceResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(action))
        }
    }
}

//! Ticket lifecycle service
//!
//! The only write path for tickets. Every mutating operation serializes on
//! the per-ticket lock, commits the status transition through the atomic
//! repository call, and only then fires platform side effects. A failed
//! side effect is logged, and reported to the caller where the operation
//! calls for it, but never rolls back the committed transition.

use tracing::{info, instrument, warn};
use validator::Validate;

use ticket_core::{DomainError, NewTicket, Snowflake, Ticket, TicketStatus, User};

use crate::dto::{
    reply_view, ticket_view, CreatedTicketView, OpenTicketRequest, RejectTicketRequest,
    ReplyRequest, ReplyView, TicketLogView, TicketView,
};

use super::binding::BindingService;
use super::catalog::CatalogService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Ticket lifecycle service
pub struct TicketService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TicketService<'a> {
    /// Create a new TicketService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join a ticket with its category and user records into a view
    async fn build_view(&self, ticket: &Ticket) -> ServiceResult<TicketView> {
        let category = self
            .ctx
            .category_repo()
            .find_by_id(ticket.category_id)
            .await?;
        let creator = self.ctx.user_repo().find_by_id(ticket.creator_id).await?;
        let assignee = match ticket.assigned_to {
            Some(id) => self.ctx.user_repo().find_by_id(id).await?,
            None => None,
        };
        Ok(ticket_view(
            ticket,
            category.as_ref(),
            creator.as_ref(),
            assignee.as_ref(),
        ))
    }

    /// Create a ticket: validate, reserve the per-guild number, persist in
    /// `Pending`, then request channel binding
    ///
    /// The number is reserved before any externally visible side effect; a
    /// binding failure leaves the ticket persisted and recoverable and is
    /// reported in the outcome, never silently dropped.
    #[instrument(skip(self, creator, request), fields(guild_id = %guild_id, creator_id = creator.id))]
    pub async fn create_ticket(
        &self,
        creator: &User,
        guild_id: Snowflake,
        request: OpenTicketRequest,
    ) -> ServiceResult<CreatedTicketView> {
        request
            .validate()
            .map_err(|e| ServiceError::from_validation_errors(&e))?;

        let category = CatalogService::new(self.ctx)
            .get_category(request.category_id)
            .await?;
        let settings = self.ctx.settings_repo().find_or_default(guild_id).await?;

        let number = self.ctx.settings_repo().next_ticket_number(guild_id).await?;
        let ticket = self
            .ctx
            .ticket_repo()
            .create(NewTicket {
                guild_id,
                number,
                category_id: category.id,
                creator_id: creator.id,
                description: request.description.trim().to_string(),
            })
            .await?;
        info!(ticket_id = ticket.id, number, "Ticket created");

        let binding = BindingService::new(self.ctx)
            .bind(&ticket, creator, &settings)
            .await;

        let (ticket, channel_bound, binding_error) = match binding {
            Ok(bound) => (bound, true, None),
            Err(e) => {
                warn!(ticket_id = ticket.id, error = %e, "Binding failed, ticket stays recoverable");
                (ticket, false, Some(e.user_message()))
            }
        };

        Ok(CreatedTicketView {
            ticket: self.build_view(&ticket).await?,
            channel_bound,
            binding_error,
        })
    }

    /// Accept a pending ticket, assigning the acting staff member
    #[instrument(skip(self, staff), fields(staff_id = staff.id))]
    pub async fn accept(&self, ticket_id: i64, staff: &User) -> ServiceResult<TicketView> {
        let _guard = self.ctx.locks().acquire(ticket_id).await;

        let ticket = self
            .ctx
            .ticket_repo()
            .transition(ticket_id, TicketStatus::Accepted, staff.id, None)
            .await?;
        info!(ticket_id, staff_id = staff.id, "Ticket accepted");

        self.notify_creator(
            &ticket,
            &format!("Your ticket #{} was accepted by {}.", ticket.number, staff.username),
        )
        .await;

        self.build_view(&ticket).await
    }

    /// Reject a pending ticket with a non-empty reason
    #[instrument(skip(self, staff, reason), fields(staff_id = staff.id))]
    pub async fn reject(
        &self,
        ticket_id: i64,
        staff: &User,
        reason: &str,
    ) -> ServiceResult<TicketView> {
        // An empty reason is the repository's EmptyRejectReason, not a
        // request validation failure
        let reason = reason.trim();
        if !reason.is_empty() {
            RejectTicketRequest {
                reason: reason.to_string(),
            }
            .validate()
            .map_err(|e| ServiceError::from_validation_errors(&e))?;
        }

        let _guard = self.ctx.locks().acquire(ticket_id).await;

        let ticket = self
            .ctx
            .ticket_repo()
            .transition(ticket_id, TicketStatus::Rejected, staff.id, Some(reason))
            .await?;
        info!(ticket_id, staff_id = staff.id, "Ticket rejected");

        self.notify_creator(
            &ticket,
            &format!(
                "Your ticket #{} was rejected: {}",
                ticket.number,
                ticket.reject_reason.as_deref().unwrap_or(reason)
            ),
        )
        .await;

        let view = self.build_view(&ticket).await?;
        self.post_log_entry(&ticket, &view).await;
        BindingService::new(self.ctx).unbind(&ticket).await;
        Ok(view)
    }

    /// Close a ticket from `Pending` or `Accepted`
    ///
    /// The committed transition is the durable truth; the channel unbind
    /// and the log-channel entry that follow are best-effort.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn close(&self, ticket_id: i64, actor: &User) -> ServiceResult<TicketView> {
        let _guard = self.ctx.locks().acquire(ticket_id).await;

        let ticket = self
            .ctx
            .ticket_repo()
            .transition(ticket_id, TicketStatus::Closed, actor.id, None)
            .await?;
        info!(ticket_id, actor_id = actor.id, "Ticket closed");

        let view = self.build_view(&ticket).await?;
        self.post_log_entry(&ticket, &view).await;
        BindingService::new(self.ctx).unbind(&ticket).await;
        Ok(view)
    }

    /// Append a reply; a staff reply auto-assigns an unassigned ticket
    #[instrument(skip(self, author, content), fields(author_id = author.id))]
    pub async fn add_response(
        &self,
        ticket_id: i64,
        author: &User,
        content: &str,
    ) -> ServiceResult<ReplyView> {
        let content = content.trim();
        ReplyRequest {
            message: content.to_string(),
        }
        .validate()
        .map_err(|e| ServiceError::from_validation_errors(&e))?;

        let _guard = self.ctx.locks().acquire(ticket_id).await;

        let ticket = self
            .ctx
            .ticket_repo()
            .find_by_id(ticket_id)
            .await?
            .ok_or(DomainError::TicketNotFound(ticket_id))?;
        if !ticket.is_open() {
            return Err(DomainError::TicketClosed(ticket_id).into());
        }

        let response = self
            .ctx
            .response_repo()
            .create(ticket_id, author.id, content)
            .await?;

        if author.is_staff && ticket.assigned_to.is_none() && !ticket.is_creator(author.id) {
            self.ctx.ticket_repo().assign(ticket_id, author.id).await?;
            info!(ticket_id, staff_id = author.id, "Staff reply auto-assigned ticket");
        }

        Ok(reply_view(&response, Some(author)))
    }

    /// Re-run binding for an open ticket without a live channel
    #[instrument(skip(self))]
    pub async fn retry_binding(&self, ticket_id: i64) -> ServiceResult<TicketView> {
        let _guard = self.ctx.locks().acquire(ticket_id).await;

        let ticket = self
            .ctx
            .ticket_repo()
            .find_by_id(ticket_id)
            .await?
            .ok_or(DomainError::TicketNotFound(ticket_id))?;
        if !ticket.is_open() {
            return Err(DomainError::TicketClosed(ticket_id).into());
        }
        if let Some(channel_id) = ticket.channel_id {
            return Err(DomainError::ChannelAlreadyBound {
                ticket_id,
                channel_id,
            }
            .into());
        }

        let creator = self
            .ctx
            .user_repo()
            .find_by_id(ticket.creator_id)
            .await?
            .ok_or(DomainError::InternalError(format!(
                "ticket {ticket_id} creator missing"
            )))?;
        let settings = self
            .ctx
            .settings_repo()
            .find_or_default(ticket.guild_id)
            .await?;

        let bound = BindingService::new(self.ctx)
            .bind(&ticket, &creator, &settings)
            .await?;
        self.build_view(&bound).await
    }

    /// List a user's tickets, newest first
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn list_for_user(&self, user: &User) -> ServiceResult<Vec<TicketView>> {
        let tickets = self.ctx.ticket_repo().list_by_user(user.id).await?;
        let mut views = Vec::with_capacity(tickets.len());
        for ticket in &tickets {
            views.push(self.build_view(ticket).await?);
        }
        Ok(views)
    }

    /// Resolve the open ticket bound to a channel
    #[instrument(skip(self))]
    pub async fn get_by_channel(&self, channel_id: Snowflake) -> ServiceResult<Ticket> {
        Ok(self
            .ctx
            .ticket_repo()
            .find_by_channel(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotBound(channel_id))?)
    }

    /// Get a ticket by id
    #[instrument(skip(self))]
    pub async fn get_ticket(&self, ticket_id: i64) -> ServiceResult<Ticket> {
        Ok(self
            .ctx
            .ticket_repo()
            .find_by_id(ticket_id)
            .await?
            .ok_or(DomainError::TicketNotFound(ticket_id))?)
    }

    /// Ticket plus its replies in one consistent read
    #[instrument(skip(self))]
    pub async fn ticket_log(&self, ticket_id: i64) -> ServiceResult<TicketLogView> {
        let _guard = self.ctx.locks().acquire(ticket_id).await;

        let ticket = self.get_ticket(ticket_id).await?;
        let responses = self.ctx.response_repo().list_by_ticket(ticket_id).await?;

        let mut replies = Vec::with_capacity(responses.len());
        for response in &responses {
            let author = self.ctx.user_repo().find_by_id(response.author_id).await?;
            replies.push(reply_view(response, author.as_ref()));
        }

        Ok(TicketLogView {
            ticket: self.build_view(&ticket).await?,
            replies,
        })
    }

    /// DM the ticket creator, best-effort
    async fn notify_creator(&self, ticket: &Ticket, text: &str) {
        let creator = match self.ctx.user_repo().find_by_id(ticket.creator_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                warn!(ticket_id = ticket.id, error = %e, "Creator lookup failed");
                return;
            }
        };

        let payload = self.ctx.presenter().message(text);
        if let Err(e) = self
            .ctx
            .platform()
            .send_direct_message(creator.discord_id, &payload)
            .await
        {
            warn!(ticket_id = ticket.id, error = %e, "Creator notification failed");
        }
    }

    /// Post a lifecycle entry to the guild's log channel, best-effort
    async fn post_log_entry(&self, ticket: &Ticket, view: &TicketView) {
        let settings = match self
            .ctx
            .settings_repo()
            .find_or_default(ticket.guild_id)
            .await
        {
            Ok(settings) => settings,
            Err(e) => {
                warn!(ticket_id = ticket.id, error = %e, "Settings lookup failed");
                return;
            }
        };
        let Some(log_channel) = settings.log_channel_id else {
            return;
        };

        let payload = self.ctx.presenter().ticket(view);
        if let Err(e) = self
            .ctx
            .platform()
            .send_channel_message(log_channel, &payload)
            .await
        {
            warn!(ticket_id = ticket.id, error = %e, "Log channel post failed");
        }
    }
}

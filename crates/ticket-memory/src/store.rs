//! Shared in-memory state and the repository trait implementations

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rand::seq::SliceRandom;

use ticket_core::{
    AutoReply, AutoReplyRepository, Category, CategoryRepository, DomainError, GuildSettings,
    NewCategory, NewTicket, RepoResult, ResponseRepository, SettingsMutation, SettingsRepository,
    Snowflake, Ticket, TicketRepository, TicketResponse, TicketStatus, User, UserProfile,
    UserRepository,
};

#[derive(Default)]
struct State {
    users: HashMap<i64, User>,
    categories: Vec<Category>,
    tickets: HashMap<i64, Ticket>,
    responses: Vec<TicketResponse>,
    settings: HashMap<i64, GuildSettings>,
    auto_replies: Vec<AutoReply>,

    next_user_id: i64,
    next_category_id: i64,
    next_ticket_id: i64,
    next_response_id: i64,
    next_reply_id: i64,
}

impl State {
    fn ticket_mut(&mut self, id: i64) -> Result<&mut Ticket, DomainError> {
        self.tickets
            .get_mut(&id)
            .ok_or(DomainError::TicketNotFound(id))
    }
}

/// In-memory storage backend implementing every repository trait
///
/// Cloning is cheap; clones share the same underlying state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// UserRepository
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    async fn upsert(&self, profile: &UserProfile) -> RepoResult<User> {
        let mut state = self.state.write();

        if let Some(user) = state
            .users
            .values_mut()
            .find(|u| u.discord_id == profile.discord_id)
        {
            user.touch(profile.username.clone(), profile.avatar.clone());
            user.is_staff = profile.is_staff;
            return Ok(user.clone());
        }

        state.next_user_id += 1;
        let id = state.next_user_id;
        let mut user = User::new(id, profile.discord_id, profile.username.clone());
        user.avatar.clone_from(&profile.avatar);
        user.is_staff = profile.is_staff;
        state.users.insert(id, user.clone());
        Ok(user)
    }
}

// ============================================================================
// CategoryRepository
// ============================================================================

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        Ok(self.state.read().categories.clone())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        let state = self.state.read();
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn seed(&self, categories: &[NewCategory]) -> RepoResult<()> {
        let mut state = self.state.write();
        if !state.categories.is_empty() {
            return Ok(());
        }

        for new in categories {
            state.next_category_id += 1;
            let id = state.next_category_id;
            state.categories.push(Category::new(
                id,
                new.name.clone(),
                new.emoji.clone(),
                new.description.clone(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TicketRepository
// ============================================================================

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn create(&self, new: NewTicket) -> RepoResult<Ticket> {
        let mut state = self.state.write();
        state.next_ticket_id += 1;
        let id = state.next_ticket_id;
        let ticket = Ticket::new(
            id,
            new.number,
            new.guild_id,
            new.category_id,
            new.creator_id,
            new.description,
        );
        state.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Ticket>> {
        Ok(self.state.read().tickets.get(&id).cloned())
    }

    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Option<Ticket>> {
        let state = self.state.read();
        Ok(state
            .tickets
            .values()
            .find(|t| t.channel_id == Some(channel_id) && t.is_open())
            .cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> RepoResult<Vec<Ticket>> {
        let state = self.state.read();
        let mut tickets: Vec<Ticket> = state
            .tickets
            .values()
            .filter(|t| t.creator_id == user_id)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tickets)
    }

    async fn list_open_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Ticket>> {
        let state = self.state.read();
        let mut tickets: Vec<Ticket> = state
            .tickets
            .values()
            .filter(|t| t.guild_id == guild_id && t.is_open())
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tickets)
    }

    async fn transition(
        &self,
        id: i64,
        to: TicketStatus,
        actor_id: i64,
        reason: Option<&str>,
    ) -> RepoResult<Ticket> {
        // Guard and write happen under one write lock, so a racing caller
        // observes InvalidTransition rather than overwriting the winner
        let mut state = self.state.write();
        let ticket = state.ticket_mut(id)?;

        match to {
            TicketStatus::Accepted => ticket.accept(actor_id)?,
            TicketStatus::Rejected => ticket.reject(actor_id, reason.unwrap_or_default())?,
            TicketStatus::Closed => ticket.close(actor_id)?,
            TicketStatus::Pending => {
                return Err(DomainError::InvalidTransition {
                    from: ticket.status,
                    to,
                })
            }
        }

        Ok(ticket.clone())
    }

    async fn assign(&self, id: i64, staff_id: i64) -> RepoResult<Ticket> {
        let mut state = self.state.write();
        let ticket = state.ticket_mut(id)?;
        if ticket.assigned_to.is_none() {
            ticket.assigned_to = Some(staff_id);
            ticket.updated_at = Utc::now();
        }
        Ok(ticket.clone())
    }

    async fn bind_channel(&self, id: i64, channel_id: Snowflake) -> RepoResult<Ticket> {
        let mut state = self.state.write();

        if state
            .tickets
            .values()
            .any(|t| t.id != id && t.channel_id == Some(channel_id))
        {
            return Err(DomainError::ChannelInUse(channel_id));
        }

        let ticket = state.ticket_mut(id)?;
        ticket.bind_channel(channel_id)?;
        Ok(ticket.clone())
    }

    async fn clear_channel(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.write();
        let ticket = state.ticket_mut(id)?;
        ticket.channel_id = None;
        ticket.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// ResponseRepository
// ============================================================================

#[async_trait]
impl ResponseRepository for MemoryStore {
    async fn create(
        &self,
        ticket_id: i64,
        author_id: i64,
        content: &str,
    ) -> RepoResult<TicketResponse> {
        let mut state = self.state.write();
        if !state.tickets.contains_key(&ticket_id) {
            return Err(DomainError::TicketNotFound(ticket_id));
        }

        state.next_response_id += 1;
        let response = TicketResponse::new(
            state.next_response_id,
            ticket_id,
            author_id,
            content.to_string(),
        );
        state.responses.push(response.clone());
        Ok(response)
    }

    async fn list_by_ticket(&self, ticket_id: i64) -> RepoResult<Vec<TicketResponse>> {
        let state = self.state.read();
        let mut responses: Vec<TicketResponse> = state
            .responses
            .iter()
            .filter(|r| r.ticket_id == ticket_id)
            .cloned()
            .collect();
        responses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(responses)
    }
}

// ============================================================================
// SettingsRepository
// ============================================================================

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn find_or_default(&self, guild_id: Snowflake) -> RepoResult<GuildSettings> {
        let mut state = self.state.write();
        Ok(state
            .settings
            .entry(guild_id.into_inner())
            .or_insert_with(|| GuildSettings::defaults(guild_id))
            .clone())
    }

    async fn upsert(
        &self,
        guild_id: Snowflake,
        patch: SettingsMutation,
    ) -> RepoResult<GuildSettings> {
        let mut state = self.state.write();
        let settings = state
            .settings
            .entry(guild_id.into_inner())
            .or_insert_with(|| GuildSettings::defaults(guild_id));

        if let Some(prefix) = patch.prefix {
            settings.prefix = prefix;
        }
        if let Some(role) = patch.staff_role_id {
            settings.staff_role_id = Some(role);
        }
        if let Some(channel) = patch.log_channel_id {
            settings.log_channel_id = Some(channel);
        }
        if let Some((channel, message)) = patch.panel {
            settings.panel_channel_id = Some(channel);
            settings.panel_message_id = Some(message);
        }
        settings.updated_at = Utc::now();
        Ok(settings.clone())
    }

    async fn next_ticket_number(&self, guild_id: Snowflake) -> RepoResult<i32> {
        // Single write lock makes the read-increment-store atomic
        let mut state = self.state.write();
        let settings = state
            .settings
            .entry(guild_id.into_inner())
            .or_insert_with(|| GuildSettings::defaults(guild_id));
        settings.last_ticket_number += 1;
        settings.updated_at = Utc::now();
        Ok(settings.last_ticket_number)
    }
}

// ============================================================================
// AutoReplyRepository
// ============================================================================

#[async_trait]
impl AutoReplyRepository for MemoryStore {
    async fn random(&self) -> RepoResult<Option<AutoReply>> {
        let state = self.state.read();
        Ok(state.auto_replies.choose(&mut rand::thread_rng()).cloned())
    }

    async fn seed(&self, contents: &[String]) -> RepoResult<()> {
        let mut state = self.state.write();
        if !state.auto_replies.is_empty() {
            return Ok(());
        }

        for content in contents {
            state.next_reply_id += 1;
            let id = state.next_reply_id;
            state.auto_replies.push(AutoReply {
                id,
                content: content.clone(),
            });
        }
        Ok(())
    }
}

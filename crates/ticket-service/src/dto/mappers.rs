//! Entity to view mappers
//!
//! Views join data from several repositories, so these are free functions
//! taking the already-fetched parts rather than `From` impls.

use ticket_core::{Category, GuildSettings, Ticket, TicketResponse, User};

use super::responses::{CategoryView, ReplyView, SettingsView, TicketView, UserView};

/// Build the public view of a user
pub fn user_view(user: &User) -> UserView {
    UserView {
        id: user.id,
        discord_id: user.discord_id,
        username: user.username.clone(),
        is_staff: user.is_staff,
    }
}

/// Build the view of a category
pub fn category_view(category: &Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name.clone(),
        emoji: category.emoji.clone(),
        label: category.label(),
        description: category.description.clone(),
    }
}

/// Build a ticket snapshot from its already-fetched parts
pub fn ticket_view(
    ticket: &Ticket,
    category: Option<&Category>,
    creator: Option<&User>,
    assignee: Option<&User>,
) -> TicketView {
    TicketView {
        id: ticket.id,
        number: ticket.number,
        status: ticket.status.to_string(),
        description: ticket.description.clone(),
        category: category.map(category_view),
        creator: creator.map(user_view),
        assigned_to: assignee.map(user_view),
        reject_reason: ticket.reject_reason.clone(),
        channel_id: ticket.channel_id,
        created_at: ticket.created_at,
        closed_at: ticket.closed_at,
    }
}

/// Build a reply view with its resolved author
pub fn reply_view(response: &TicketResponse, author: Option<&User>) -> ReplyView {
    ReplyView {
        id: response.id,
        author: author.map(user_view),
        content: response.content.clone(),
        created_at: response.created_at,
    }
}

impl From<&GuildSettings> for SettingsView {
    fn from(settings: &GuildSettings) -> Self {
        Self {
            guild_id: settings.guild_id,
            prefix: settings.prefix.clone(),
            staff_role_id: settings.staff_role_id,
            log_channel_id: settings.log_channel_id,
            last_ticket_number: settings.last_ticket_number,
        }
    }
}

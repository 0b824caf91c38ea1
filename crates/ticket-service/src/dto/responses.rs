//! View DTOs handed to the presenter
//!
//! All views implement `Serialize`. Snowflake IDs serialize as strings for
//! JavaScript compatibility (the `Snowflake` type handles that itself).

use chrono::{DateTime, Utc};
use serde::Serialize;
use ticket_core::Snowflake;

/// Public slice of a user record
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub discord_id: Snowflake,
    pub username: String,
    pub is_staff: bool,
}

/// A selectable ticket category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    /// Display label, e.g. `⚽ Transfer`
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Snapshot of a ticket, built from one consistent read
#[derive(Debug, Clone, Serialize)]
pub struct TicketView {
    pub id: i64,
    pub number: i32,
    pub status: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

/// A ticket reply with its resolved author
#[derive(Debug, Clone, Serialize)]
pub struct ReplyView {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserView>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Ticket plus replies, newest reply first
#[derive(Debug, Clone, Serialize)]
pub struct TicketLogView {
    pub ticket: TicketView,
    pub replies: Vec<ReplyView>,
}

/// Outcome of a ticket creation
///
/// `channel_bound` is false when the ticket was persisted but the channel
/// could not be created; `binding_error` carries the reason for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedTicketView {
    pub ticket: TicketView,
    pub channel_bound: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_error: Option<String>,
}

/// Guild configuration snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub guild_id: Snowflake,
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_role_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_channel_id: Option<Snowflake>,
    pub last_ticket_number: i32,
}

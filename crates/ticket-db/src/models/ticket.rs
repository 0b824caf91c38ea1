//! Ticket database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tickets table
///
/// `status` stays a plain string here; parsing into the typed lifecycle enum
/// happens in the mapper so a corrupted row surfaces as an error instead of
/// a panic.
#[derive(Debug, Clone, FromRow)]
pub struct TicketModel {
    pub id: i64,
    pub number: i32,
    pub guild_id: i64,
    pub category_id: i64,
    pub creator_id: i64,
    pub assigned_to: Option<i64>,
    pub description: String,
    pub status: String,
    pub reject_reason: Option<String>,
    pub channel_id: Option<i64>,
    pub closed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

//! Guild settings database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for guild_settings table
#[derive(Debug, Clone, FromRow)]
pub struct GuildSettingsModel {
    pub guild_id: i64,
    pub prefix: String,
    pub staff_role_id: Option<i64>,
    pub last_ticket_number: i32,
    pub log_channel_id: Option<i64>,
    pub panel_channel_id: Option<i64>,
    pub panel_message_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

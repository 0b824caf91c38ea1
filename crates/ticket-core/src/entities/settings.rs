//! GuildSettings entity - per-guild configuration
//!
//! Settings are lazily created with defaults the first time a guild is seen.
//! `last_ticket_number` is the numbering authority's persisted state; it is
//! only ever advanced through `SettingsRepository::next_ticket_number`, never
//! written directly.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Default command prefix for a freshly configured guild
pub const DEFAULT_PREFIX: &str = ".";

/// Per-guild bot configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSettings {
    pub guild_id: Snowflake,
    pub prefix: String,
    /// Role whose holders may accept/reject/close tickets
    pub staff_role_id: Option<Snowflake>,
    /// Last issued per-guild ticket sequence number
    pub last_ticket_number: i32,
    /// Channel receiving closed-ticket log entries
    pub log_channel_id: Option<Snowflake>,
    /// Channel and message of the ticket creation panel, kept so the panel
    /// can be replaced idempotently instead of duplicated
    pub panel_channel_id: Option<Snowflake>,
    pub panel_message_id: Option<Snowflake>,
    pub updated_at: DateTime<Utc>,
}

impl GuildSettings {
    /// Default settings for a guild seen for the first time
    #[must_use]
    pub fn defaults(guild_id: Snowflake) -> Self {
        Self {
            guild_id,
            prefix: DEFAULT_PREFIX.to_string(),
            staff_role_id: None,
            last_ticket_number: 0,
            log_channel_id: None,
            panel_channel_id: None,
            panel_message_id: None,
            updated_at: Utc::now(),
        }
    }

    /// Check whether any of the given role ids is the configured staff role
    #[must_use]
    pub fn is_staff_role(&self, roles: &[Snowflake]) -> bool {
        match self.staff_role_id {
            Some(staff) => roles.contains(&staff),
            None => false,
        }
    }
}

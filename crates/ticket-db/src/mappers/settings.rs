//! Guild settings entity <-> model mapper

use ticket_core::{GuildSettings, Snowflake};

use crate::models::GuildSettingsModel;

impl From<GuildSettingsModel> for GuildSettings {
    fn from(model: GuildSettingsModel) -> Self {
        GuildSettings {
            guild_id: Snowflake::new(model.guild_id),
            prefix: model.prefix,
            staff_role_id: model.staff_role_id.map(Snowflake::new),
            last_ticket_number: model.last_ticket_number,
            log_channel_id: model.log_channel_id.map(Snowflake::new),
            panel_channel_id: model.panel_channel_id.map(Snowflake::new),
            panel_message_id: model.panel_message_id.map(Snowflake::new),
            updated_at: model.updated_at,
        }
    }
}

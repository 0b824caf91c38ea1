//! Test fixtures and data generators
//!
//! Canonical guild, role and actor values shared across the scenario tests.

use ticket_core::{SettingsMutation, Snowflake};
use ticket_service::ActorContext;

use crate::helpers::TestApp;

/// Guild every scenario runs in
pub const GUILD: Snowflake = Snowflake::new(100);

/// Role configured as the staff role
pub const STAFF_ROLE: Snowflake = Snowflake::new(200);

/// Description long enough to pass request validation
pub const DESCRIPTION: &str = "need a trade to another club";

/// Plain guild member, no roles
pub fn member_actor(user_id: i64, channel_id: i64) -> ActorContext {
    ActorContext {
        user_id: Snowflake::new(user_id),
        guild_id: GUILD,
        channel_id: Snowflake::new(channel_id),
        username: format!("member{user_id}"),
        avatar: None,
        is_admin: false,
        roles: vec![],
    }
}

/// Member carrying the staff role
pub fn staff_actor(user_id: i64, channel_id: i64) -> ActorContext {
    ActorContext {
        roles: vec![STAFF_ROLE],
        username: format!("staff{user_id}"),
        ..member_actor(user_id, channel_id)
    }
}

/// Guild administrator
pub fn admin_actor(user_id: i64, channel_id: i64) -> ActorContext {
    ActorContext {
        is_admin: true,
        username: format!("admin{user_id}"),
        ..member_actor(user_id, channel_id)
    }
}

/// Point the guild's staff role at [`STAFF_ROLE`]
pub async fn configure_staff_role(app: &TestApp) -> anyhow::Result<()> {
    app.ctx
        .settings_repo()
        .upsert(
            GUILD,
            SettingsMutation {
                staff_role_id: Some(STAFF_ROLE),
                ..SettingsMutation::default()
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

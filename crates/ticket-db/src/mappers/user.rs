//! User entity <-> model mapper

use ticket_core::{Snowflake, User};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            discord_id: Snowflake::new(model.discord_id),
            username: model.username,
            avatar: model.avatar,
            is_staff: model.is_staff,
            last_seen_at: model.last_seen_at,
            created_at: model.created_at,
        }
    }
}

//! User entity - a platform actor known to the system

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A Discord user the bot has seen at least once
///
/// Created on first contact and refreshed on every subsequent interaction;
/// user records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Internal storage-assigned id
    pub id: i64,
    /// Discord user id (unique)
    pub discord_id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
    pub is_staff: bool,
    pub last_seen_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new non-staff user record
    #[must_use]
    pub fn new(id: i64, discord_id: Snowflake, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            discord_id,
            username,
            avatar: None,
            is_staff: false,
            last_seen_at: now,
            created_at: now,
        }
    }

    /// Refresh the profile fields on a repeat interaction
    pub fn touch(&mut self, username: String, avatar: Option<String>) {
        self.username = username;
        if avatar.is_some() {
            self.avatar = avatar;
        }
        self.last_seen_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_not_staff() {
        let user = User::new(1, Snowflake::new(100), "yusuf".to_string());
        assert!(!user.is_staff);
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_touch_refreshes_profile() {
        let mut user = User::new(1, Snowflake::new(100), "yusuf".to_string());
        let seen = user.last_seen_at;

        user.touch("yusuf2".to_string(), Some("abc".to_string()));
        assert_eq!(user.username, "yusuf2");
        assert_eq!(user.avatar.as_deref(), Some("abc"));
        assert!(user.last_seen_at >= seen);

        // A missing avatar on a later interaction does not erase the stored one
        user.touch("yusuf2".to_string(), None);
        assert_eq!(user.avatar.as_deref(), Some("abc"));
    }
}

//! Permission bitflags applied to private ticket channels
//!
//! The channel created for a ticket is hidden from @everyone and opened to
//! exactly three parties: the ticket creator, the configured staff role, and
//! the bot itself. These flags describe the allow/deny sets handed to the
//! platform when the channel is created.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Discord-like channel permission flags
    ///
    /// Stored as a 64-bit integer, serialized as string in JSON for
    /// JavaScript safety.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// View channel and read messages
        const VIEW_CHANNEL         = 1 << 0;
        /// Send messages in the channel
        const SEND_MESSAGES        = 1 << 1;
        /// Read the channel's message history
        const READ_MESSAGE_HISTORY = 1 << 2;
        /// Edit or delete the channel
        const MANAGE_CHANNELS      = 1 << 3;
        /// Bypass all permission checks
        const ADMINISTRATOR        = 1 << 4;

        /// What a ticket participant (creator or staff) gets
        const TICKET_PARTICIPANT = Self::VIEW_CHANNEL.bits()
            | Self::SEND_MESSAGES.bits()
            | Self::READ_MESSAGE_HISTORY.bits();

        /// What the bot itself needs in a ticket channel
        const TICKET_BOT = Self::TICKET_PARTICIPANT.bits()
            | Self::MANAGE_CHANNELS.bits();
    }
}

impl Permissions {
    /// Check if the permission set contains a required permission
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }
}

// Serialize as string (consistent with Snowflake)
impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bits = s
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom("invalid permission bits"))?;
        Ok(Permissions::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_set() {
        let p = Permissions::TICKET_PARTICIPANT;
        assert!(p.has(Permissions::VIEW_CHANNEL));
        assert!(p.has(Permissions::SEND_MESSAGES));
        assert!(!p.has(Permissions::MANAGE_CHANNELS));
    }

    #[test]
    fn test_administrator_bypasses() {
        let p = Permissions::ADMINISTRATOR;
        assert!(p.has(Permissions::MANAGE_CHANNELS));
        assert!(p.has(Permissions::VIEW_CHANNEL));
    }

    #[test]
    fn test_serde_round_trip() {
        let p = Permissions::TICKET_BOT;
        let json = serde_json::to_string(&p).unwrap();
        let back: Permissions = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}

//! Platform client trait (port) - define the interface to the chat platform
//!
//! Channel creation, deletion and message delivery go through this trait so
//! the service layer never talks to a gateway directly. Tests script a fake
//! implementation; production wires the real Discord client.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::value_objects::{Permissions, Snowflake};

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Errors surfaced by the platform side
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Platform request failed: {0}")]
    Failed(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(Snowflake),
}

/// A single permission overwrite applied to a created channel
#[derive(Debug, Clone, Copy)]
pub struct ChannelOverwrite {
    /// User or role the overwrite targets
    pub target: Snowflake,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl ChannelOverwrite {
    /// Grant the target the full participant set
    pub fn allow_participant(target: Snowflake) -> Self {
        Self {
            target,
            allow: Permissions::TICKET_PARTICIPANT,
            deny: Permissions::empty(),
        }
    }

    /// Grant the bot itself the participant set plus channel management, so
    /// it can post into and later delete the channel it created
    pub fn allow_bot(target: Snowflake) -> Self {
        Self {
            target,
            allow: Permissions::TICKET_BOT,
            deny: Permissions::empty(),
        }
    }

    /// Hide the channel from the target entirely
    pub fn deny_view(target: Snowflake) -> Self {
        Self {
            target,
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
        }
    }
}

#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Create a private text channel in a guild with the given overwrites,
    /// returning the new channel's id
    async fn create_private_channel(
        &self,
        guild_id: Snowflake,
        name: &str,
        overwrites: &[ChannelOverwrite],
    ) -> PlatformResult<Snowflake>;

    /// Delete a channel
    async fn delete_channel(&self, channel_id: Snowflake) -> PlatformResult<()>;

    /// Check whether a channel still exists on the platform
    async fn channel_exists(&self, channel_id: Snowflake) -> PlatformResult<bool>;

    /// Post a rendered payload to a channel
    async fn send_channel_message(&self, channel_id: Snowflake, payload: &Value)
        -> PlatformResult<()>;

    /// Deliver a rendered payload to a user's direct messages
    async fn send_direct_message(&self, user_id: Snowflake, payload: &Value)
        -> PlatformResult<()>;
}

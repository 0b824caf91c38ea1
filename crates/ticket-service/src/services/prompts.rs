//! Awaited-input prompts
//!
//! Some flows need a follow-up message from the user (rejecting a ticket
//! asks for the reason first). Instead of callback-style collectors, the
//! dispatcher records an explicit [`PendingPrompt`] keyed by actor and
//! channel; the next message from that actor in that channel resumes the
//! flow. An expired prompt is discarded and the ticket stays in its prior
//! state.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use ticket_core::Snowflake;

use super::error::{ServiceError, ServiceResult};

/// What the awaited input will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Next message is the reject reason for this ticket
    RejectReason { ticket_id: i64 },
}

#[derive(Debug, Clone, Copy)]
struct PendingPrompt {
    kind: PromptKind,
    expires_at: Instant,
}

/// Pending prompt table keyed by (actor, channel)
pub struct PendingPrompts {
    ttl: Duration,
    entries: DashMap<(i64, i64), PendingPrompt>,
}

impl PendingPrompts {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Record a prompt, replacing any previous one for the same actor/channel
    pub fn begin(&self, actor: Snowflake, channel: Snowflake, kind: PromptKind) {
        self.entries.insert(
            (actor.into_inner(), channel.into_inner()),
            PendingPrompt {
                kind,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Take the pending prompt for an actor/channel pair
    ///
    /// Returns `Ok(None)` when nothing was awaited, `Err(PromptExpired)`
    /// when the prompt outlived its deadline. Either way the entry is gone
    /// afterwards; prompts are single-use.
    pub fn take(&self, actor: Snowflake, channel: Snowflake) -> ServiceResult<Option<PromptKind>> {
        let key = (actor.into_inner(), channel.into_inner());
        match self.entries.remove(&key) {
            None => Ok(None),
            Some((_, prompt)) => {
                if Instant::now() > prompt.expires_at {
                    return Err(ServiceError::PromptExpired);
                }
                Ok(Some(prompt.kind))
            }
        }
    }

    /// Whether a live prompt is open for this actor/channel pair
    ///
    /// Non-consuming; the gateway uses this to decide whether a plain
    /// message is awaited input or just chatter.
    pub fn peek(&self, actor: Snowflake, channel: Snowflake) -> bool {
        self.entries
            .get(&(actor.into_inner(), channel.into_inner()))
            .is_some_and(|prompt| Instant::now() <= prompt.expires_at)
    }

    /// Drop a pending prompt without consuming it, e.g. on cancel
    pub fn cancel(&self, actor: Snowflake, channel: Snowflake) {
        self.entries
            .remove(&(actor.into_inner(), channel.into_inner()));
    }
}

//! De-duplication cooldown gate
//!
//! Discord delivers double-clicks and command retries as distinct events.
//! The gate absorbs repeats of the same action kind from the same actor in
//! the same channel inside a short window; duplicates fail fast with
//! `DuplicateAction` before any mutation happens.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use ticket_core::Snowflake;

use super::error::{ServiceError, ServiceResult};

/// Once the table grows past this, stale entries are swept on the next check
const SWEEP_THRESHOLD: usize = 1024;

type Key = (i64, i64, &'static str);

/// Cooldown table keyed by (actor, channel, action kind)
pub struct CooldownGate {
    window: Duration,
    hits: DashMap<Key, Instant>,
}

impl CooldownGate {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            hits: DashMap::new(),
        }
    }

    /// Record a hit, failing with `DuplicateAction` inside the window
    pub fn check(
        &self,
        actor: Snowflake,
        channel: Snowflake,
        kind: &'static str,
    ) -> ServiceResult<()> {
        let key = (actor.into_inner(), channel.into_inner(), kind);
        let now = Instant::now();

        if let Some(last) = self.hits.get(&key) {
            if now.duration_since(*last) < self.window {
                return Err(ServiceError::DuplicateAction);
            }
        }
        self.hits.insert(key, now);

        if self.hits.len() > SWEEP_THRESHOLD {
            let window = self.window;
            self.hits.retain(|_, hit| now.duration_since(*hit) < window);
        }

        Ok(())
    }
}

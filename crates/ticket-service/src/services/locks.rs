//! Per-ticket async locks
//!
//! Lifecycle operations on one ticket are serialized through a keyed
//! `tokio::sync::Mutex`; racing transitions then resolve first-wins, and
//! the loser observes `InvalidTransition` from the repository instead of
//! silently overwriting the winner's result.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed lock table; cloning shares the underlying table
#[derive(Clone, Default)]
pub struct TicketLocks {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl TicketLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a ticket, waiting if another operation holds it
    pub async fn acquire(&self, ticket_id: i64) -> OwnedMutexGuard<()> {
        // Clone out of the map entry before awaiting so the shard lock is
        // not held across the await point
        let lock = self
            .locks
            .entry(ticket_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

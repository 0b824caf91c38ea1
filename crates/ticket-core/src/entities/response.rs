//! TicketResponse entity - a threaded reply on a ticket

use chrono::{DateTime, Utc};

/// A reply attached to a ticket; append-only, never edited or deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketResponse {
    pub id: i64,
    pub ticket_id: i64,
    /// Internal id of the author
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TicketResponse {
    #[must_use]
    pub fn new(id: i64, ticket_id: i64, author_id: i64, content: String) -> Self {
        Self {
            id,
            ticket_id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }
}

//! Ticket response database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for ticket_responses table
#[derive(Debug, Clone, FromRow)]
pub struct TicketResponseModel {
    pub id: i64,
    pub ticket_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

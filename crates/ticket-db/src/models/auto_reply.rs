//! Auto-reply database model

use sqlx::FromRow;

/// Database model for auto_replies table
#[derive(Debug, Clone, FromRow)]
pub struct AutoReplyModel {
    pub id: i64,
    pub content: String,
}

//! AutoReply entity - a canned quip posted into fresh ticket channels

/// A seeded one-liner; one is picked at random when a ticket channel opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoReply {
    pub id: i64,
    pub content: String,
}

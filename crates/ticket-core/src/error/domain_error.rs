//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Snowflake, TicketStatus};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Ticket not found: {0}")]
    TicketNotFound(i64),

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("No open ticket bound to channel {0}")]
    ChannelNotBound(Snowflake),

    // =========================================================================
    // Transition Errors
    // =========================================================================
    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition {
        from: TicketStatus,
        to: TicketStatus,
    },

    #[error("Ticket {0} is closed and no longer accepts replies")]
    TicketClosed(i64),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Ticket {ticket_id} is already bound to channel {channel_id}")]
    ChannelAlreadyBound {
        ticket_id: i64,
        channel_id: Snowflake,
    },

    #[error("Channel {0} already hosts an open ticket")]
    ChannelInUse(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Reject reason must not be empty")]
    EmptyRejectReason,

    #[error("Description too short: at least {min} characters required")]
    DescriptionTooShort { min: usize },

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and boundary responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::TicketNotFound(_) => "UNKNOWN_TICKET",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ChannelNotBound(_) => "UNKNOWN_CHANNEL",

            // Transition
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::TicketClosed(_) => "TICKET_CLOSED",

            // Conflict
            Self::ChannelAlreadyBound { .. } => "CHANNEL_ALREADY_BOUND",
            Self::ChannelInUse(_) => "CHANNEL_IN_USE",

            // Validation
            Self::EmptyRejectReason => "EMPTY_REJECT_REASON",
            Self::DescriptionTooShort { .. } => "DESCRIPTION_TOO_SHORT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TicketNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::UserNotFound(_)
                | Self::ChannelNotBound(_)
        )
    }

    /// Check if this is an illegal-transition error
    ///
    /// These are logged for diagnosis since they may indicate a race or a
    /// duplicate click reaching the engine.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. } | Self::TicketClosed(_))
    }

    /// Check if this is a validation error (rejected before any write)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyRejectReason
                | Self::DescriptionTooShort { .. }
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ChannelAlreadyBound { .. } | Self::ChannelInUse(_)
        )
    }
}

//! Ticket status - the lifecycle state machine
//!
//! ```text
//!            accept                close
//! Pending ----------> Accepted ----------> Closed
//!    |                                       ^
//!    |  reject                   close       |
//!    +----------> Rejected       Pending ----+
//! ```
//!
//! `Rejected` and `Closed` are terminal. Close is legal straight from
//! `Pending` (no acceptance required) as well as from `Accepted`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting a staff decision
    #[default]
    Pending,
    /// Accepted and assigned to a staff member
    Accepted,
    /// Rejected with a reason
    Rejected,
    /// Closed by staff or the creator
    Closed,
}

impl TicketStatus {
    /// Check whether a transition from `self` to `to` is legal
    #[must_use]
    pub fn can_transition_to(self, to: TicketStatus) -> bool {
        use TicketStatus::{Accepted, Closed, Pending, Rejected};
        matches!(
            (self, to),
            (Pending, Accepted) | (Pending, Rejected) | (Pending, Closed) | (Accepted, Closed)
        )
    }

    /// The set of statuses from which `self` may be entered
    #[must_use]
    pub fn legal_sources(self) -> &'static [TicketStatus] {
        use TicketStatus::{Accepted, Closed, Pending, Rejected};
        match self {
            Pending => &[],
            Accepted | Rejected => &[Pending],
            Closed => &[Pending, Accepted],
        }
    }

    /// Terminal statuses admit no further transitions
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Closed)
    }

    /// A ticket is "open" while its status is non-terminal
    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    /// Stable string form used for database storage
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Closed => "closed",
        }
    }

    /// Parse the database string form
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

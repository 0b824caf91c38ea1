//! Ticket entity - the central lifecycle object
//!
//! A ticket is mutated only through the transition methods below; direct
//! field writes from outside the storage layer are a bug. The internal `id`
//! is globally unique and storage-assigned; `number` is the per-guild
//! sequence used for channel naming and display. The two are deliberately
//! distinct so numbering can never collide across guilds.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{Snowflake, TicketStatus};

/// A single support request tracked from creation to closure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Internal storage-assigned id, globally unique
    pub id: i64,
    /// Per-guild sequence number, used for the `ticket-N` channel name
    pub number: i32,
    pub guild_id: Snowflake,
    pub category_id: i64,
    /// Internal id of the creating user
    pub creator_id: i64,
    /// Internal id of the assigned staff member, set on accept
    pub assigned_to: Option<i64>,
    pub description: String,
    pub status: TicketStatus,
    pub reject_reason: Option<String>,
    /// Bound private channel, set once by the binding step
    pub channel_id: Option<Snowflake>,
    /// Internal id of whoever closed or rejected the ticket
    pub closed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a fresh pending ticket
    #[must_use]
    pub fn new(
        id: i64,
        number: i32,
        guild_id: Snowflake,
        category_id: i64,
        creator_id: i64,
        description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            number,
            guild_id,
            category_id,
            creator_id,
            assigned_to: None,
            description,
            status: TicketStatus::Pending,
            reject_reason: None,
            channel_id: None,
            closed_by: None,
            created_at: now,
            closed_at: None,
            updated_at: now,
        }
    }

    /// Channel name the binding step will request, e.g. `ticket-42`
    #[must_use]
    pub fn channel_name(&self) -> String {
        format!("ticket-{}", self.number)
    }

    /// Check if a user is the ticket's creator
    #[inline]
    #[must_use]
    pub fn is_creator(&self, user_id: i64) -> bool {
        self.creator_id == user_id
    }

    /// Whether the ticket still accepts replies and transitions
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    fn guard_transition(&self, to: TicketStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }

    /// Accept the ticket and assign the acting staff member
    ///
    /// Legal only from `Pending`.
    pub fn accept(&mut self, staff_id: i64) -> Result<(), DomainError> {
        self.guard_transition(TicketStatus::Accepted)?;
        self.status = TicketStatus::Accepted;
        self.assigned_to = Some(staff_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reject the ticket with a reason
    ///
    /// Legal only from `Pending`; the reason must be non-empty.
    pub fn reject(&mut self, staff_id: i64, reason: &str) -> Result<(), DomainError> {
        if reason.trim().is_empty() {
            return Err(DomainError::EmptyRejectReason);
        }
        self.guard_transition(TicketStatus::Rejected)?;
        self.status = TicketStatus::Rejected;
        self.reject_reason = Some(reason.trim().to_string());
        self.closed_by = Some(staff_id);
        self.closed_at = Some(Utc::now());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Close the ticket
    ///
    /// Legal from `Pending` (direct close) or `Accepted`.
    pub fn close(&mut self, closed_by: i64) -> Result<(), DomainError> {
        self.guard_transition(TicketStatus::Closed)?;
        self.status = TicketStatus::Closed;
        self.closed_by = Some(closed_by);
        self.closed_at = Some(Utc::now());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record the bound channel id
    ///
    /// The binding is set once; rebinding is only legal after the previous
    /// channel vanished and the binding was cleared by reconciliation.
    pub fn bind_channel(&mut self, channel_id: Snowflake) -> Result<(), DomainError> {
        if let Some(existing) = self.channel_id {
            return Err(DomainError::ChannelAlreadyBound {
                ticket_id: self.id,
                channel_id: existing,
            });
        }
        self.channel_id = Some(channel_id);
        self.updated_at = Utc::now();
        Ok(())
    }
}

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the storage backends (PostgreSQL,
//! in-memory) provide the implementation. Any backend can sit behind these
//! traits, which is what makes deterministic lifecycle tests possible.

use async_trait::async_trait;

use crate::entities::{AutoReply, Category, GuildSettings, Ticket, TicketResponse, User};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, TicketStatus};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Profile data carried by every inbound interaction
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub discord_id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
    pub is_staff: bool,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by internal id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Create the user on first contact, or refresh name/avatar/last-seen
    async fn upsert(&self, profile: &UserProfile) -> RepoResult<User>;
}

// ============================================================================
// Category Repository
// ============================================================================

/// Seed data for a category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub emoji: String,
    pub description: Option<String>,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories in id order
    async fn list(&self) -> RepoResult<Vec<Category>>;

    /// Find category by id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>>;

    /// Insert seed categories if the catalog is empty; no-op otherwise
    async fn seed(&self, categories: &[NewCategory]) -> RepoResult<()>;
}

// ============================================================================
// Ticket Repository
// ============================================================================

/// Creation data for a ticket; the sequence number is reserved beforehand
/// through [`SettingsRepository::next_ticket_number`]
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub guild_id: Snowflake,
    pub number: i32,
    pub category_id: i64,
    pub creator_id: i64,
    pub description: String,
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Persist a new pending ticket and assign its internal id
    async fn create(&self, new: NewTicket) -> RepoResult<Ticket>;

    /// Find ticket by internal id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Ticket>>;

    /// Find the open (non-terminal) ticket bound to a channel
    ///
    /// Terminal tickets keep their historical channel id but are not
    /// resolvable this way, which is what upholds the
    /// one-open-ticket-per-channel invariant.
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Option<Ticket>>;

    /// List a user's tickets, newest first
    async fn list_by_user(&self, user_id: i64) -> RepoResult<Vec<Ticket>>;

    /// List open tickets in a guild, newest first
    async fn list_open_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Ticket>>;

    /// Atomically apply a status transition
    ///
    /// The current status is validated against the state machine inside the
    /// same atomic unit as the write; a losing racer observes
    /// [`DomainError::InvalidTransition`], never a silent merge.
    async fn transition(
        &self,
        id: i64,
        to: TicketStatus,
        actor_id: i64,
        reason: Option<&str>,
    ) -> RepoResult<Ticket>;

    /// Assign a staff member if the ticket has no assignee yet
    ///
    /// A no-op when someone is already assigned; returns the current row
    /// either way. Used by the staff-reply auto-assign path.
    async fn assign(&self, id: i64, staff_id: i64) -> RepoResult<Ticket>;

    /// Record the bound channel id (set once)
    async fn bind_channel(&self, id: i64, channel_id: Snowflake) -> RepoResult<Ticket>;

    /// Clear a binding whose channel vanished on the platform side
    async fn clear_channel(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Response Repository
// ============================================================================

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Append a reply to a ticket
    async fn create(&self, ticket_id: i64, author_id: i64, content: &str)
        -> RepoResult<TicketResponse>;

    /// List a ticket's replies, newest first
    async fn list_by_ticket(&self, ticket_id: i64) -> RepoResult<Vec<TicketResponse>>;
}

// ============================================================================
// Settings Repository
// ============================================================================

/// Partial update applied to a guild's settings
#[derive(Debug, Clone, Default)]
pub struct SettingsMutation {
    pub prefix: Option<String>,
    pub staff_role_id: Option<Snowflake>,
    pub log_channel_id: Option<Snowflake>,
    /// Panel channel and message, recorded together
    pub panel: Option<(Snowflake, Snowflake)>,
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Get a guild's settings, lazily creating defaults on first access
    async fn find_or_default(&self, guild_id: Snowflake) -> RepoResult<GuildSettings>;

    /// Apply a partial update, creating the row with defaults if absent
    async fn upsert(&self, guild_id: Snowflake, patch: SettingsMutation)
        -> RepoResult<GuildSettings>;

    /// Reserve the next per-guild ticket sequence number
    ///
    /// The read-increment-store must be one atomic unit: concurrent callers
    /// for the same guild never receive the same number, and numbers strictly
    /// increase. Reserved numbers are never handed back; a failed creation
    /// burns its number, so gaps in the sequence are allowed.
    async fn next_ticket_number(&self, guild_id: Snowflake) -> RepoResult<i32>;
}

// ============================================================================
// Auto-Reply Repository
// ============================================================================

#[async_trait]
pub trait AutoReplyRepository: Send + Sync {
    /// Pick a random canned reply, if any are seeded
    async fn random(&self) -> RepoResult<Option<AutoReply>>;

    /// Insert seed replies if the table is empty; no-op otherwise
    async fn seed(&self, contents: &[String]) -> RepoResult<()>;
}

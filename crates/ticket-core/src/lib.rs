//! # ticket-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! ticket lifecycle state machine. This crate has zero dependencies on
//! infrastructure (database, gateway transport, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{AutoReply, Category, GuildSettings, Ticket, TicketResponse, User};
pub use error::DomainError;
pub use traits::{
    AutoReplyRepository, CategoryRepository, ChannelOverwrite, NewCategory, NewTicket,
    PlatformClient, PlatformError, PlatformResult, RepoResult, ResponseRepository,
    SettingsMutation, SettingsRepository, TicketRepository, UserProfile, UserRepository,
};
pub use value_objects::{Permissions, Snowflake, SnowflakeParseError, TicketStatus};

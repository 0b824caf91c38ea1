//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in ticket-core.
//! Each repository handles database operations for a specific domain entity.

mod auto_reply;
mod category;
mod error;
mod response;
mod settings;
mod ticket;
mod user;

pub use auto_reply::PgAutoReplyRepository;
pub use category::PgCategoryRepository;
pub use response::PgResponseRepository;
pub use settings::PgSettingsRepository;
pub use ticket::PgTicketRepository;
pub use user::PgUserRepository;

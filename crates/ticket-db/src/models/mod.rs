//! Database models - SQLx-compatible structs for PostgreSQL tables

mod auto_reply;
mod category;
mod response;
mod settings;
mod ticket;
mod user;

pub use auto_reply::AutoReplyModel;
pub use category::CategoryModel;
pub use response::TicketResponseModel;
pub use settings::GuildSettingsModel;
pub use ticket::TicketModel;
pub use user::UserModel;

//! Domain entities - core business objects

mod auto_reply;
mod category;
mod response;
mod settings;
mod ticket;
mod user;

pub use auto_reply::AutoReply;
pub use category::Category;
pub use response::TicketResponse;
pub use settings::{GuildSettings, DEFAULT_PREFIX};
pub use ticket::Ticket;
pub use user::User;

//! Value objects - immutable types that represent domain concepts

mod permissions;
mod snowflake;
mod status;

pub use permissions::Permissions;
pub use snowflake::{Snowflake, SnowflakeParseError};
pub use status::TicketStatus;

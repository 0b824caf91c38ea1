//! Data transfer objects
//!
//! Requests carry `validator` rules; views are the serializable snapshots
//! handed to the presenter.

mod mappers;
mod requests;
mod responses;

pub use mappers::{category_view, reply_view, ticket_view, user_view};
pub use requests::{OpenTicketRequest, RejectTicketRequest, ReplyRequest, SetPrefixRequest};
pub use responses::{
    CategoryView, CreatedTicketView, ReplyView, SettingsView, TicketLogView, TicketView, UserView,
};

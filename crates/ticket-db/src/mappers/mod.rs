//! Entity to model mappers
//!
//! This module provides conversions between domain entities (ticket-core) and
//! database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `TryFrom<TicketModel>` guards the status string in addition

mod auto_reply;
mod category;
mod response;
mod settings;
mod ticket;
mod user;

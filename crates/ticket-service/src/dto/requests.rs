//! Request DTOs for dispatcher actions
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Open a new ticket
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OpenTicketRequest {
    pub category_id: i64,

    #[validate(length(min = 10, max = 500, message = "Description must be 10-500 characters"))]
    pub description: String,
}

/// Reject a pending ticket
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RejectTicketRequest {
    #[validate(length(min = 1, max = 500, message = "Reject reason must be 1-500 characters"))]
    pub reason: String,
}

/// Reply inside a ticket
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyRequest {
    #[validate(length(min = 1, max = 1000, message = "Reply must be 1-1000 characters"))]
    pub message: String,
}

/// Change the guild command prefix
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPrefixRequest {
    #[validate(length(min = 1, max = 5, message = "Prefix must be 1-5 characters"))]
    pub prefix: String,
}

//! Presentation adapter - renders service outcomes into opaque payloads
//!
//! The service layer never formats Discord embeds itself; it hands typed
//! views to a [`Presenter`] and forwards whatever payload comes back. The
//! gateway adapter supplies an embed-building implementation in production;
//! [`TextPresenter`] covers tests and logs.

use serde_json::{json, Value};

use crate::dto::{CreatedTicketView, TicketLogView, TicketView};
use crate::services::ServiceError;

/// Opaque rendered payload handed back to the transport
pub type RenderPayload = Value;

/// Boundary trait for turning service outcomes into user-facing payloads
pub trait Presenter: Send + Sync {
    /// Plain informational message
    fn message(&self, text: &str) -> RenderPayload;

    /// Outcome of a ticket creation, including the binding result
    fn created(&self, view: &CreatedTicketView) -> RenderPayload;

    /// A single ticket
    fn ticket(&self, view: &TicketView) -> RenderPayload;

    /// A user's ticket list, newest first
    fn ticket_list(&self, views: &[TicketView]) -> RenderPayload;

    /// Full ticket log: ticket plus its replies
    fn ticket_log(&self, view: &TicketLogView) -> RenderPayload;

    /// Error rendering; this is the only place errors become user-facing
    fn error(&self, err: &ServiceError) -> RenderPayload;
}

/// Minimal plain-text presenter
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPresenter;

impl TextPresenter {
    fn ticket_line(view: &TicketView) -> String {
        format!(
            "#{} [{}] {}",
            view.number,
            view.status,
            view.description.chars().take(60).collect::<String>()
        )
    }
}

impl Presenter for TextPresenter {
    fn message(&self, text: &str) -> RenderPayload {
        json!({ "content": text })
    }

    fn created(&self, view: &CreatedTicketView) -> RenderPayload {
        let content = if view.channel_bound {
            format!("Ticket #{} created, your channel is ready.", view.ticket.number)
        } else {
            format!(
                "Ticket #{} created, but the channel could not be opened yet. Staff will fix this shortly.",
                view.ticket.number
            )
        };
        json!({ "content": content, "ticket_id": view.ticket.id })
    }

    fn ticket(&self, view: &TicketView) -> RenderPayload {
        json!({ "content": Self::ticket_line(view), "ticket_id": view.id })
    }

    fn ticket_list(&self, views: &[TicketView]) -> RenderPayload {
        if views.is_empty() {
            return json!({ "content": "You have no tickets yet." });
        }
        let lines: Vec<String> = views.iter().map(Self::ticket_line).collect();
        json!({ "content": lines.join("\n") })
    }

    fn ticket_log(&self, view: &TicketLogView) -> RenderPayload {
        let mut lines = vec![Self::ticket_line(&view.ticket)];
        for reply in &view.replies {
            let author = reply
                .author
                .as_ref()
                .map_or("unknown", |a| a.username.as_str());
            lines.push(format!("  {}: {}", author, reply.content));
        }
        json!({ "content": lines.join("\n") })
    }

    fn error(&self, err: &ServiceError) -> RenderPayload {
        json!({
            "content": err.user_message(),
            "error_code": err.error_code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_carries_code() {
        let presenter = TextPresenter;
        let payload = presenter.error(&ServiceError::DuplicateAction);
        assert_eq!(payload["error_code"], "DUPLICATE_ACTION");
    }

    #[test]
    fn test_empty_ticket_list() {
        let presenter = TextPresenter;
        let payload = presenter.ticket_list(&[]);
        assert_eq!(payload["content"], "You have no tickets yet.");
    }
}

//! Ticket response entity <-> model mapper

use ticket_core::TicketResponse;

use crate::models::TicketResponseModel;

impl From<TicketResponseModel> for TicketResponse {
    fn from(model: TicketResponseModel) -> Self {
        TicketResponse {
            id: model.id,
            ticket_id: model.ticket_id,
            author_id: model.author_id,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

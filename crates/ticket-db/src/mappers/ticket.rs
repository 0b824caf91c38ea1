//! Ticket entity <-> model mapper

use ticket_core::{DomainError, Snowflake, Ticket, TicketStatus};

use crate::models::TicketModel;

impl TryFrom<TicketModel> for Ticket {
    type Error = DomainError;

    fn try_from(model: TicketModel) -> Result<Self, Self::Error> {
        let status = TicketStatus::from_str_opt(&model.status).ok_or_else(|| {
            DomainError::InternalError(format!(
                "ticket {} has unknown status '{}'",
                model.id, model.status
            ))
        })?;

        Ok(Ticket {
            id: model.id,
            number: model.number,
            guild_id: Snowflake::new(model.guild_id),
            category_id: model.category_id,
            creator_id: model.creator_id,
            assigned_to: model.assigned_to,
            description: model.description,
            status,
            reject_reason: model.reject_reason,
            channel_id: model.channel_id.map(Snowflake::new),
            closed_by: model.closed_by,
            created_at: model.created_at,
            closed_at: model.closed_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(status: &str) -> TicketModel {
        TicketModel {
            id: 1,
            number: 7,
            guild_id: 100,
            category_id: 2,
            creator_id: 3,
            assigned_to: None,
            description: "help".to_string(),
            status: status.to_string(),
            reject_reason: None,
            channel_id: None,
            closed_by: None,
            created_at: Utc::now(),
            closed_at: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_parses() {
        let ticket = Ticket::try_from(model("accepted")).unwrap();
        assert_eq!(ticket.status, TicketStatus::Accepted);
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        assert!(Ticket::try_from(model("archived")).is_err());
    }
}

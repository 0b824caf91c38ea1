//! PostgreSQL implementation of TicketRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ticket_core::{
    DomainError, NewTicket, RepoResult, Snowflake, Ticket, TicketRepository, TicketStatus,
};

use crate::models::TicketModel;

use super::error::{map_db_error, map_unique_violation, ticket_not_found};

/// PostgreSQL implementation of TicketRepository
#[derive(Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    /// Create a new PgTicketRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn current_status(&self, id: i64) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT status FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    #[instrument(skip(self, new), fields(guild_id = %new.guild_id, number = new.number))]
    async fn create(&self, new: NewTicket) -> RepoResult<Ticket> {
        let result = sqlx::query_as::<_, TicketModel>(
            r"
            INSERT INTO tickets (number, guild_id, category_id, creator_id, description,
                                 status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', NOW(), NOW())
            RETURNING id, number, guild_id, category_id, creator_id, assigned_to, description,
                      status, reject_reason, channel_id, closed_by, created_at, closed_at,
                      updated_at
            ",
        )
        .bind(new.number)
        .bind(new.guild_id.into_inner())
        .bind(new.category_id)
        .bind(new.creator_id)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ticket::try_from(result)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Ticket>> {
        let result = sqlx::query_as::<_, TicketModel>(
            r"
            SELECT id, number, guild_id, category_id, creator_id, assigned_to, description,
                   status, reject_reason, channel_id, closed_by, created_at, closed_at, updated_at
            FROM tickets
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Ticket::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Option<Ticket>> {
        // Only open tickets resolve through their channel; terminal tickets
        // keep the column for history but stop answering here
        let result = sqlx::query_as::<_, TicketModel>(
            r"
            SELECT id, number, guild_id, category_id, creator_id, assigned_to, description,
                   status, reject_reason, channel_id, closed_by, created_at, closed_at, updated_at
            FROM tickets
            WHERE channel_id = $1 AND status IN ('pending', 'accepted')
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Ticket::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: i64) -> RepoResult<Vec<Ticket>> {
        let result = sqlx::query_as::<_, TicketModel>(
            r"
            SELECT id, number, guild_id, category_id, creator_id, assigned_to, description,
                   status, reject_reason, channel_id, closed_by, created_at, closed_at, updated_at
            FROM tickets
            WHERE creator_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.into_iter().map(Ticket::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_open_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Ticket>> {
        let result = sqlx::query_as::<_, TicketModel>(
            r"
            SELECT id, number, guild_id, category_id, creator_id, assigned_to, description,
                   status, reject_reason, channel_id, closed_by, created_at, closed_at, updated_at
            FROM tickets
            WHERE guild_id = $1 AND status IN ('pending', 'accepted')
            ORDER BY created_at DESC
            ",
        )
        .bind(guild_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.into_iter().map(Ticket::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn transition(
        &self,
        id: i64,
        to: TicketStatus,
        actor_id: i64,
        reason: Option<&str>,
    ) -> RepoResult<Ticket> {
        let reason = reason.map(str::trim);
        if to == TicketStatus::Rejected && reason.is_none_or(str::is_empty) {
            return Err(DomainError::EmptyRejectReason);
        }

        // Status guard and write in one statement keeps the transition
        // atomic: the losing side of a race matches zero rows
        let sources: Vec<String> = to
            .legal_sources()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let result = sqlx::query_as::<_, TicketModel>(
            r"
            UPDATE tickets
            SET status = $2,
                assigned_to = CASE WHEN $2 = 'accepted' THEN $3 ELSE assigned_to END,
                reject_reason = CASE WHEN $2 = 'rejected' THEN $4 ELSE reject_reason END,
                closed_by = CASE WHEN $2 IN ('rejected', 'closed') THEN $3 ELSE closed_by END,
                closed_at = CASE WHEN $2 IN ('rejected', 'closed') THEN NOW() ELSE closed_at END,
                updated_at = NOW()
            WHERE id = $1 AND status = ANY($5)
            RETURNING id, number, guild_id, category_id, creator_id, assigned_to, description,
                      status, reject_reason, channel_id, closed_by, created_at, closed_at,
                      updated_at
            ",
        )
        .bind(id)
        .bind(to.as_str())
        .bind(actor_id)
        .bind(reason)
        .bind(&sources)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ticket::try_from(model),
            None => match self.current_status(id).await? {
                None => Err(ticket_not_found(id)),
                Some(status) => {
                    let from = TicketStatus::from_str_opt(&status).ok_or_else(|| {
                        DomainError::InternalError(format!(
                            "ticket {id} has unknown status '{status}'"
                        ))
                    })?;
                    Err(DomainError::InvalidTransition { from, to })
                }
            },
        }
    }

    #[instrument(skip(self))]
    async fn assign(&self, id: i64, staff_id: i64) -> RepoResult<Ticket> {
        let result = sqlx::query_as::<_, TicketModel>(
            r"
            UPDATE tickets
            SET assigned_to = $2, updated_at = NOW()
            WHERE id = $1 AND assigned_to IS NULL
            RETURNING id, number, guild_id, category_id, creator_id, assigned_to, description,
                      status, reject_reason, channel_id, closed_by, created_at, closed_at,
                      updated_at
            ",
        )
        .bind(id)
        .bind(staff_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ticket::try_from(model),
            // Already assigned; hand back the current row
            None => self
                .find_by_id(id)
                .await?
                .ok_or_else(|| ticket_not_found(id)),
        }
    }

    #[instrument(skip(self))]
    async fn bind_channel(&self, id: i64, channel_id: Snowflake) -> RepoResult<Ticket> {
        let result = sqlx::query_as::<_, TicketModel>(
            r"
            UPDATE tickets
            SET channel_id = $2, updated_at = NOW()
            WHERE id = $1 AND channel_id IS NULL
            RETURNING id, number, guild_id, category_id, creator_id, assigned_to, description,
                      status, reject_reason, channel_id, closed_by, created_at, closed_at,
                      updated_at
            ",
        )
        .bind(id)
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ChannelInUse(channel_id)))?;

        match result {
            Some(model) => Ticket::try_from(model),
            None => match self.find_by_id(id).await? {
                None => Err(ticket_not_found(id)),
                Some(ticket) => Err(DomainError::ChannelAlreadyBound {
                    ticket_id: ticket.id,
                    channel_id: ticket.channel_id.unwrap_or(channel_id),
                }),
            },
        }
    }

    #[instrument(skip(self))]
    async fn clear_channel(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE tickets
            SET channel_id = NULL, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(ticket_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTicketRepository>();
    }
}

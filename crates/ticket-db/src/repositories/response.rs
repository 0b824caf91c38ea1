//! PostgreSQL implementation of ResponseRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ticket_core::{RepoResult, ResponseRepository, TicketResponse};

use crate::models::TicketResponseModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ResponseRepository
#[derive(Clone)]
pub struct PgResponseRepository {
    pool: PgPool,
}

impl PgResponseRepository {
    /// Create a new PgResponseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PgResponseRepository {
    #[instrument(skip(self, content))]
    async fn create(
        &self,
        ticket_id: i64,
        author_id: i64,
        content: &str,
    ) -> RepoResult<TicketResponse> {
        let result = sqlx::query_as::<_, TicketResponseModel>(
            r"
            INSERT INTO ticket_responses (ticket_id, author_id, content, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, ticket_id, author_id, content, created_at
            ",
        )
        .bind(ticket_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(TicketResponse::from(result))
    }

    #[instrument(skip(self))]
    async fn list_by_ticket(&self, ticket_id: i64) -> RepoResult<Vec<TicketResponse>> {
        let result = sqlx::query_as::<_, TicketResponseModel>(
            r"
            SELECT id, ticket_id, author_id, content, created_at
            FROM ticket_responses
            WHERE ticket_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(TicketResponse::from).collect())
    }
}

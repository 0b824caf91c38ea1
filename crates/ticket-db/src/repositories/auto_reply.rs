//! PostgreSQL implementation of AutoReplyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ticket_core::{AutoReply, AutoReplyRepository, RepoResult};

use crate::models::AutoReplyModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AutoReplyRepository
#[derive(Clone)]
pub struct PgAutoReplyRepository {
    pool: PgPool,
}

impl PgAutoReplyRepository {
    /// Create a new PgAutoReplyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AutoReplyRepository for PgAutoReplyRepository {
    #[instrument(skip(self))]
    async fn random(&self) -> RepoResult<Option<AutoReply>> {
        let result = sqlx::query_as::<_, AutoReplyModel>(
            r"
            SELECT id, content
            FROM auto_replies
            ORDER BY random()
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AutoReply::from))
    }

    #[instrument(skip(self, contents), fields(count = contents.len()))]
    async fn seed(&self, contents: &[String]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM auto_replies")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if existing > 0 {
            return Ok(());
        }

        for content in contents {
            sqlx::query("INSERT INTO auto_replies (content) VALUES ($1)")
                .bind(content)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}

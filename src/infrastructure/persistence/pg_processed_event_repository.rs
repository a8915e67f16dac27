//! PostgreSQL implementation of the processed-event dedup set.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::ProcessedEventRepository;
use crate::error::AppError;

/// Append-only `processed_events` table keyed by event id.
///
/// `ON CONFLICT DO NOTHING` makes the insert itself the membership test:
/// zero affected rows means the event was already recorded.
pub struct PgProcessedEventRepository {
    pool: Arc<PgPool>,
}

impl PgProcessedEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcessedEventRepository for PgProcessedEventRepository {
    async fn mark_processed(&self, event_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO processed_events (event_id)
            VALUES ($1)
            ON CONFLICT (event_id) DO NOTHING
            "#,
        )
        .bind(event_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

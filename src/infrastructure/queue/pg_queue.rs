//! PostgreSQL-backed durable queue.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::transport::{QueueError, QueueMessage, QueueResult, QueueTransport};

/// How often `receive` re-checks for visible messages while long-polling.
const POLL_GRANULARITY: Duration = Duration::from_millis(250);

/// Durable queue on top of the `queue_messages` table.
///
/// Delivery semantics:
///
/// - `send` inserts a row that is immediately visible.
/// - `receive` claims visible rows with `FOR UPDATE SKIP LOCKED`, pushes
///   their `visible_at` forward by the visibility timeout, bumps
///   `receive_count`, and stamps a fresh receipt handle. Concurrent
///   receivers never claim the same row.
/// - `delete` removes the row matching the current receipt handle; a stale
///   handle matches nothing.
/// - Rows whose `receive_count` has reached `max_receive_count` are moved to
///   `dead_letter_messages` during the next receive sweep, bounding
///   poison-message redelivery.
pub struct PgQueue {
    pool: Arc<PgPool>,
    visibility_timeout: Duration,
    max_receive_count: i32,
}

impl PgQueue {
    /// Creates a queue handle over a connection pool.
    pub fn new(pool: Arc<PgPool>, visibility_timeout: Duration, max_receive_count: i32) -> Self {
        Self {
            pool,
            visibility_timeout,
            max_receive_count,
        }
    }

    /// Moves expired-and-exhausted messages to the dead-letter table.
    async fn sweep_dead_letters(&self) -> QueueResult<u64> {
        let result = sqlx::query(
            r#"
            WITH dead AS (
                DELETE FROM queue_messages
                WHERE visible_at <= now()
                  AND receive_count >= $1
                RETURNING body, receive_count
            )
            INSERT INTO dead_letter_messages (body, receive_count)
            SELECT body, receive_count FROM dead
            "#,
        )
        .bind(self.max_receive_count)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    /// Claims up to `max_messages` visible messages in one statement.
    async fn claim(&self, max_messages: i64) -> QueueResult<Vec<QueueMessage>> {
        let rows = sqlx::query(
            r#"
            UPDATE queue_messages m
            SET receive_count = m.receive_count + 1,
                visible_at = now() + make_interval(secs => $2),
                receipt_handle = gen_random_uuid()
            FROM (
                SELECT id FROM queue_messages
                WHERE visible_at <= now()
                  AND receive_count < $3
                ORDER BY id
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            ) AS claimed
            WHERE m.id = claimed.id
            RETURNING m.id, m.body, m.receipt_handle, m.receive_count
            "#,
        )
        .bind(max_messages)
        .bind(self.visibility_timeout.as_secs_f64())
        .bind(self.max_receive_count)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(QueueMessage {
                    message_id: row.try_get::<i64, _>("id")?.to_string(),
                    body: row.try_get("body")?,
                    receipt_handle: row.try_get::<Uuid, _>("receipt_handle")?.to_string(),
                    receive_count: row.try_get("receive_count")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl QueueTransport for PgQueue {
    async fn send(&self, body: &str) -> QueueResult<String> {
        let id: i64 = sqlx::query_scalar("INSERT INTO queue_messages (body) VALUES ($1) RETURNING id")
            .bind(body)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(id.to_string())
    }

    async fn receive(&self, max_messages: i64, wait: Duration) -> QueueResult<Vec<QueueMessage>> {
        let deadline = tokio::time::Instant::now() + wait;

        loop {
            let dead = self.sweep_dead_letters().await?;
            if dead > 0 {
                tracing::warn!(count = dead, "moved exhausted messages to dead letter table");
            }

            let batch = self.claim(max_messages).await?;
            if !batch.is_empty() {
                return Ok(batch);
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Ok(Vec::new());
            }

            tokio::time::sleep(POLL_GRANULARITY.min(deadline - now)).await;
        }
    }

    async fn delete(&self, receipt_handle: &str) -> QueueResult<()> {
        let receipt = Uuid::parse_str(receipt_handle)
            .map_err(|_| QueueError::InvalidReceipt(receipt_handle.to_string()))?;

        let result = sqlx::query("DELETE FROM queue_messages WHERE receipt_handle = $1")
            .bind(receipt)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            // Stale receipt: the visibility timeout elapsed and the message
            // was claimed again under a fresh handle.
            tracing::debug!(receipt = receipt_handle, "delete matched no message");
        }

        Ok(())
    }

    async fn depth(&self) -> QueueResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queue_messages")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

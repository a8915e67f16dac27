//! Queue transport trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue transport error: {0}")]
    Transport(String),
    #[error("Invalid receipt handle: {0}")]
    InvalidReceipt(String),
}

impl From<sqlx::Error> for QueueError {
    fn from(e: sqlx::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// A message handed out by [`QueueTransport::receive`].
///
/// `receipt_handle` is an opaque token tied to this delivery; it is the only
/// way to acknowledge (delete) the message, and a later redelivery carries a
/// fresh handle.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub message_id: String,
    pub body: String,
    pub receipt_handle: String,
    pub receive_count: i32,
}

/// An SQS-style durable queue: at-least-once delivery, visibility timeout,
/// acknowledge-by-receipt.
///
/// A received message stays invisible for the transport's visibility timeout;
/// if it is not deleted within that window it becomes receivable again.
/// Consumers must therefore tolerate duplicate delivery. Messages that exceed
/// the transport's maximum receive count are moved to a dead-letter store
/// instead of being redelivered forever.
///
/// # Implementations
///
/// - [`crate::infrastructure::queue::PgQueue`] - durable, PostgreSQL-backed
/// - [`crate::infrastructure::queue::MemoryQueue`] - in-process, for tests and local runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueTransport: Send + Sync {
    /// Enqueues a message body and returns its message id.
    async fn send(&self, body: &str) -> QueueResult<String>;

    /// Receives up to `max_messages` visible messages, waiting up to `wait`
    /// for at least one to become available (long poll). Returns an empty
    /// batch on timeout.
    async fn receive(&self, max_messages: i64, wait: Duration) -> QueueResult<Vec<QueueMessage>>;

    /// Deletes (acknowledges) a message by its current receipt handle.
    ///
    /// Deleting with a stale handle is a no-op: the message was already
    /// redelivered under a fresh handle.
    async fn delete(&self, receipt_handle: &str) -> QueueResult<()>;

    /// Number of messages currently in the queue (visible or in flight).
    /// Used by health checks and the admin CLI.
    async fn depth(&self) -> QueueResult<i64>;
}

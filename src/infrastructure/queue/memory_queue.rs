//! In-process queue implementation for tests and local runs.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::transport::{QueueMessage, QueueResult, QueueTransport};

/// How often `receive` re-checks for visible messages while long-polling.
const POLL_GRANULARITY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
struct StoredMessage {
    id: i64,
    body: String,
    visible_at: Instant,
    receive_count: i32,
    receipt_handle: Option<Uuid>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    messages: Vec<StoredMessage>,
    dead_letters: Vec<String>,
}

/// A [`QueueTransport`] with the same delivery semantics as
/// [`super::PgQueue`] (visibility timeout, receive-count bound, receipt
/// handles), backed by process memory.
///
/// Used by the test suite and available for local development without a
/// database-backed queue. Not durable: contents die with the process.
pub struct MemoryQueue {
    inner: Mutex<Inner>,
    visibility_timeout: Duration,
    max_receive_count: i32,
}

impl MemoryQueue {
    pub fn new(visibility_timeout: Duration, max_receive_count: i32) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            visibility_timeout,
            max_receive_count,
        }
    }

    /// Number of messages moved to the dead-letter store.
    pub fn dead_letter_count(&self) -> usize {
        self.inner.lock().unwrap().dead_letters.len()
    }

    /// Bodies of every message ever enqueued and still pending, in order.
    /// Test helper for asserting publish behavior.
    pub fn pending_bodies(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .messages
            .iter()
            .map(|m| m.body.clone())
            .collect()
    }

    fn try_claim(&self, max_messages: i64) -> Vec<QueueMessage> {
        let mut inner = self.inner.lock().unwrap();
        let now = Instant::now();

        // Dead-letter sweep: expired messages that exhausted their
        // redeliveries never become visible again.
        let max_receive_count = self.max_receive_count;
        let mut dead = Vec::new();
        inner.messages.retain(|m| {
            if m.visible_at <= now && m.receive_count >= max_receive_count {
                dead.push(m.body.clone());
                false
            } else {
                true
            }
        });
        if !dead.is_empty() {
            tracing::warn!(count = dead.len(), "moved exhausted messages to dead letter store");
            inner.dead_letters.extend(dead);
        }

        let mut batch = Vec::new();
        for message in inner.messages.iter_mut() {
            if batch.len() as i64 >= max_messages {
                break;
            }
            if message.visible_at > now {
                continue;
            }

            message.receive_count += 1;
            message.visible_at = now + self.visibility_timeout;
            let receipt = Uuid::new_v4();
            message.receipt_handle = Some(receipt);

            batch.push(QueueMessage {
                message_id: message.id.to_string(),
                body: message.body.clone(),
                receipt_handle: receipt.to_string(),
                receive_count: message.receive_count,
            });
        }

        batch
    }
}

#[async_trait]
impl QueueTransport for MemoryQueue {
    async fn send(&self, body: &str) -> QueueResult<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;

        inner.messages.push(StoredMessage {
            id,
            body: body.to_string(),
            visible_at: Instant::now(),
            receive_count: 0,
            receipt_handle: None,
        });

        Ok(id.to_string())
    }

    async fn receive(&self, max_messages: i64, wait: Duration) -> QueueResult<Vec<QueueMessage>> {
        let deadline = Instant::now() + wait;

        loop {
            let batch = self.try_claim(max_messages);
            if !batch.is_empty() {
                return Ok(batch);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(Vec::new());
            }

            tokio::time::sleep(POLL_GRANULARITY.min(deadline - now)).await;
        }
    }

    async fn delete(&self, receipt_handle: &str) -> QueueResult<()> {
        let receipt = Uuid::parse_str(receipt_handle).ok();
        let mut inner = self.inner.lock().unwrap();
        let before = inner.messages.len();
        inner
            .messages
            .retain(|m| m.receipt_handle != receipt || receipt.is_none());

        if inner.messages.len() == before {
            tracing::debug!(receipt = receipt_handle, "delete matched no message");
        }

        Ok(())
    }

    async fn depth(&self) -> QueueResult<i64> {
        Ok(self.inner.lock().unwrap().messages.len() as i64)
    }
}

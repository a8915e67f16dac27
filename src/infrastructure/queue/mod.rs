//! Queue transport abstractions (PostgreSQL-backed and in-memory implementations).

pub mod memory_queue;
pub mod pg_queue;
pub mod transport;

pub use memory_queue::MemoryQueue;
pub use pg_queue::PgQueue;
pub use transport::{QueueError, QueueMessage, QueueResult, QueueTransport};

#[cfg(test)]
pub use transport::MockQueueTransport;

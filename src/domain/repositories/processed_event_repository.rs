//! Repository trait for the processed-event dedup set.

use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Append-only set of event ids the budget worker has already applied.
///
/// The queue delivers at least once; budget deltas are not idempotent on
/// their own. Recording each event id before applying its delta makes a
/// redelivered message a no-op.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProcessedEventRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessedEventRepository: Send + Sync {
    /// Records an event id as processed.
    ///
    /// Returns `Ok(true)` if the id was newly recorded, `Ok(false)` if it was
    /// already present (duplicate delivery).
    async fn mark_processed(&self, event_id: Uuid) -> Result<bool, AppError>;
}

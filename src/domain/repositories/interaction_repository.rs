//! Repository trait for interaction data access.

use crate::domain::entities::{Interaction, InteractionPatch, NewInteraction};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recorded user interactions.
///
/// Reads and updates exclude soft-deleted rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgInteractionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Persists a new interaction and returns it with its assigned id.
    ///
    /// When `timestamp` is absent the store stamps the creation time.
    async fn create(&self, new_interaction: NewInteraction) -> Result<Interaction, AppError>;

    /// Lists interactions recorded against a campaign, newest first,
    /// excluding soft-deleted.
    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Interaction>, AppError>;

    /// Partially updates an interaction. `None` fields are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live interaction matches `id`.
    async fn update(&self, id: i64, patch: InteractionPatch) -> Result<Interaction, AppError>;

    /// Soft-deletes an interaction.
    ///
    /// Returns `Ok(true)` if found and deleted, `Ok(false)` if not found or
    /// already deleted.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}

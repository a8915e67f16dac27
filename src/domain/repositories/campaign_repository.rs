//! Repository trait for campaign data access.

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing campaigns.
///
/// Every read and update excludes soft-deleted rows; the filter is part of
/// the contract, not the caller's responsibility.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCampaignRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Creates a new campaign and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError>;

    /// Finds a campaign by id, excluding soft-deleted campaigns.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Campaign))` if found and not deleted
    /// - `Ok(None)` otherwise
    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError>;

    /// Lists campaigns with pagination, newest first, excluding soft-deleted.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Campaign>, AppError>;

    /// Counts campaigns, excluding soft-deleted.
    async fn count(&self) -> Result<i64, AppError>;

    /// Partially updates a campaign. `None` fields are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live campaign matches `id`.
    async fn update(&self, id: i64, patch: CampaignPatch) -> Result<Campaign, AppError>;

    /// Soft-deletes a campaign by setting `deleted_at = now()`.
    ///
    /// Returns `Ok(true)` if the campaign was found and deleted, `Ok(false)`
    /// if not found or already deleted.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;

    /// Applies a signed budget delta atomically at the storage layer.
    ///
    /// The implementation must be a single conditional update
    /// (`budget = budget + delta` where the campaign is live), never a
    /// read-modify-write, so concurrent workers cannot lose updates.
    ///
    /// Returns `Ok(true)` if a live campaign was adjusted, `Ok(false)` if the
    /// id is unknown or the campaign is soft-deleted.
    async fn adjust_budget(&self, id: i64, delta: i64) -> Result<bool, AppError>;
}

//! Campaign management service.

use std::sync::Arc;

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for creating, reading, updating, and soft-deleting campaigns.
///
/// Budget mutation from interaction events does NOT go through this service;
/// the budget worker talks to [`CampaignRepository::adjust_budget`] directly.
pub struct CampaignService<R: CampaignRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CampaignRepository + ?Sized> CampaignService<R> {
    /// Creates a new campaign service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `end_date` precedes `start_date`.
    pub async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        check_date_range(new_campaign.start_date, new_campaign.end_date)?;
        self.repository.create(new_campaign).await
    }

    /// Retrieves a campaign by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist or is
    /// soft-deleted.
    pub async fn get_campaign(&self, id: i64) -> Result<Campaign, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Campaign not found", json!({ "id": id })))
    }

    /// Lists campaigns with the total live count for pagination.
    pub async fn list_campaigns(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Campaign>, i64), AppError> {
        let campaigns = self.repository.list(offset, limit).await?;
        let total = self.repository.count().await?;
        Ok((campaigns, total))
    }

    /// Partially updates a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch sets both dates in the
    /// wrong order, [`AppError::NotFound`] if no live campaign matches.
    pub async fn update_campaign(
        &self,
        id: i64,
        patch: CampaignPatch,
    ) -> Result<Campaign, AppError> {
        if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
            check_date_range(start, end)?;
        }
        self.repository.update(id, patch).await
    }

    /// Soft-deletes a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist or is
    /// already deleted.
    pub async fn delete_campaign(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.soft_delete(id).await? {
            return Err(AppError::not_found(
                "Campaign not found or already deleted",
                json!({ "id": id }),
            ));
        }
        Ok(())
    }

    /// Live campaign count, for health checks and the admin CLI.
    pub async fn count_campaigns(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn check_date_range(
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::bad_request(
            "end_date must not precede start_date",
            json!({ "start_date": start, "end_date": end }),
        ));
    }
    Ok(())
}

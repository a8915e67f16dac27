//! DTOs for campaign endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};

/// Request to create a campaign.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    /// Campaign display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Initial budget. May be negative; the budget worker applies signed
    /// deltas on top of whatever is set here.
    #[serde(default)]
    pub budget: i64,
}

impl From<CreateCampaignRequest> for NewCampaign {
    fn from(req: CreateCampaignRequest) -> Self {
        Self {
            name: req.name,
            start_date: req.start_date,
            end_date: req.end_date,
            budget: req.budget,
        }
    }
}

/// Partial update for a campaign. Omitted fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<i64>,
}

impl From<UpdateCampaignRequest> for CampaignPatch {
    fn from(req: UpdateCampaignRequest) -> Self {
        Self {
            name: req.name,
            start_date: req.start_date,
            end_date: req.end_date,
            budget: req.budget,
        }
    }
}

/// JSON representation of a campaign.
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            budget: campaign.budget,
            created_at: campaign.created_at,
        }
    }
}

/// Paginated campaign listing.
#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub campaigns: Vec<CampaignResponse>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_request_rejects_empty_name() {
        let req: CreateCampaignRequest = serde_json::from_str(
            r#"{ "name": "", "start_date": "2026-06-01", "end_date": "2026-08-31" }"#,
        )
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_budget_defaults_to_zero() {
        let req: CreateCampaignRequest = serde_json::from_str(
            r#"{ "name": "Summer", "start_date": "2026-06-01", "end_date": "2026-08-31" }"#,
        )
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.budget, 0);
    }

    #[test]
    fn test_update_request_all_optional() {
        let req: UpdateCampaignRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());

        let patch = CampaignPatch::from(req);
        assert!(patch.name.is_none());
        assert!(patch.budget.is_none());
    }
}

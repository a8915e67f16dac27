//! Campaign entity representing a marketing campaign.

use chrono::{DateTime, NaiveDate, Utc};

/// A marketing campaign with a date range and a running budget.
///
/// `budget` is a signed amount: the budget worker decrements it on CLICK
/// events and increments it on ADD events, and direct API updates may set it
/// to any value.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: i64,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Campaign {
    /// Returns true if the campaign has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if the given date falls within the campaign's run.
    pub fn is_running_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Input data for creating a new campaign.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: i64,
}

/// Partial update for an existing campaign.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<i64>,
}

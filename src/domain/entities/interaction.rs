//! Interaction entity representing a user action against a campaign.

use chrono::{DateTime, Utc};

/// A recorded user interaction (click, add, etc.) against a campaign.
///
/// `campaign_id` is a plain reference without enforced integrity: an
/// interaction may be recorded before its campaign exists, and the budget
/// worker silently skips events whose campaign is missing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Interaction {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub interaction_type: String,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Interaction {
    /// Returns true if the interaction has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Input data for creating a new interaction.
///
/// `timestamp` of `None` means "now"; the store stamps creation time.
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub campaign_id: i64,
    pub user_id: i64,
    pub interaction_type: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Partial update for an existing interaction.
///
/// Updates never re-publish queue events; only the create path does.
#[derive(Debug, Clone, Default)]
pub struct InteractionPatch {
    pub user_id: Option<i64>,
    pub interaction_type: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

//! DTOs for interaction endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{Interaction, InteractionPatch, NewInteraction};

/// Compiled regex for interaction type labels (`CLICK`, `ADD`, `PAGE_VIEW`, ...).
static INTERACTION_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

/// Request to record an interaction.
///
/// `timestamp` is optional; the store stamps creation time when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInteractionRequest {
    pub campaign_id: i64,
    pub user_id: i64,

    /// Uppercase label. `CLICK` and `ADD` affect the campaign budget; other
    /// labels are recorded but carry no budget effect.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*INTERACTION_TYPE_REGEX"))]
    pub interaction_type: String,

    pub timestamp: Option<DateTime<Utc>>,
}

impl From<CreateInteractionRequest> for NewInteraction {
    fn from(req: CreateInteractionRequest) -> Self {
        Self {
            campaign_id: req.campaign_id,
            user_id: req.user_id,
            interaction_type: req.interaction_type,
            timestamp: req.timestamp,
        }
    }
}

/// Partial update for an interaction. Omitted fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInteractionRequest {
    pub user_id: Option<i64>,

    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*INTERACTION_TYPE_REGEX"))]
    pub interaction_type: Option<String>,

    pub timestamp: Option<DateTime<Utc>>,
}

impl From<UpdateInteractionRequest> for InteractionPatch {
    fn from(req: UpdateInteractionRequest) -> Self {
        Self {
            user_id: req.user_id,
            interaction_type: req.interaction_type,
            timestamp: req.timestamp,
        }
    }
}

/// JSON representation of an interaction.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub interaction_type: String,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Interaction> for InteractionResponse {
    fn from(interaction: Interaction) -> Self {
        Self {
            id: interaction.id,
            campaign_id: interaction.campaign_id,
            user_id: interaction.user_id,
            interaction_type: interaction.interaction_type,
            timestamp: interaction.timestamp,
            created_at: interaction.created_at,
        }
    }
}

/// Interactions recorded against one campaign.
#[derive(Debug, Serialize)]
pub struct InteractionListResponse {
    pub campaign_id: i64,
    pub interactions: Vec<InteractionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn request(interaction_type: &str) -> CreateInteractionRequest {
        serde_json::from_value(serde_json::json!({
            "campaign_id": 42,
            "user_id": 7,
            "interaction_type": interaction_type,
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_types_pass() {
        assert!(request("CLICK").validate().is_ok());
        assert!(request("ADD").validate().is_ok());
        assert!(request("PAGE_VIEW_2").validate().is_ok());
    }

    #[test]
    fn test_invalid_types_fail() {
        assert!(request("click").validate().is_err());
        assert!(request("").validate().is_err());
        assert!(request("CLICK!").validate().is_err());
        assert!(request("_CLICK").validate().is_err());
    }

    #[test]
    fn test_timestamp_is_optional() {
        let req = request("CLICK");
        assert!(req.timestamp.is_none());

        let new = NewInteraction::from(req);
        assert!(new.timestamp.is_none());
    }
}

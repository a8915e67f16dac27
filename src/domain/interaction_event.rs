//! Interaction event model for asynchronous budget adjustment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Interaction;

/// Recognized interaction types that carry a budget effect.
///
/// Anything outside this set is accepted on the wire but applies no budget
/// delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Click,
    Add,
}

impl EventType {
    /// Parses a wire-format interaction type label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "CLICK" => Some(Self::Click),
            "ADD" => Some(Self::Add),
            _ => None,
        }
    }

    /// The signed budget delta this event type applies, given the configured
    /// unit amount. CLICK spends budget, ADD replenishes it.
    pub fn budget_delta(self, unit: i64) -> i64 {
        match self {
            Self::Click => -unit,
            Self::Add => unit,
        }
    }
}

/// The queue message payload published for every persisted interaction.
///
/// Serialized as camelCase JSON with an ISO-8601 timestamp:
///
/// ```json
/// { "eventId": "…", "campaignId": 1, "userId": 2,
///   "interactionType": "CLICK", "timestamp": "2026-08-07T12:00:00Z" }
/// ```
///
/// `event_id` is generated at publish time and is the dedup key the budget
/// worker records before applying the delta, so a redelivered message is a
/// no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    pub event_id: Uuid,
    pub campaign_id: i64,
    pub user_id: i64,
    pub interaction_type: String,
    pub timestamp: DateTime<Utc>,
}

impl InteractionEvent {
    /// Builds the event for a freshly persisted interaction, minting a new
    /// event id.
    pub fn from_interaction(interaction: &Interaction) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            campaign_id: interaction.campaign_id,
            user_id: interaction.user_id,
            interaction_type: interaction.interaction_type.clone(),
            timestamp: interaction.timestamp,
        }
    }

    /// The budget delta for this event, or `None` when the interaction type
    /// is not recognized.
    pub fn budget_delta(&self, unit: i64) -> Option<i64> {
        EventType::parse(&self.interaction_type).map(|t| t.budget_delta(unit))
    }
}

//! Background worker applying budget deltas from queued interaction events.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::domain::interaction_event::InteractionEvent;
use crate::domain::repositories::{CampaignRepository, ProcessedEventRepository};
use crate::error::AppError;
use crate::infrastructure::queue::QueueTransport;

/// Tuning for the budget worker poll loop.
#[derive(Debug, Clone)]
pub struct BudgetWorkerSettings {
    /// Delay between poll cycles.
    pub poll_interval: Duration,
    /// Long-poll wait passed to the queue on each receive.
    pub wait_time: Duration,
    /// Maximum messages claimed per receive.
    pub max_messages: i64,
    /// Budget amount one CLICK subtracts and one ADD adds.
    pub budget_unit: i64,
}

/// What processing a single message amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A budget delta was applied to a live campaign.
    Applied { campaign_id: i64, delta: i64 },
    /// The event id was already recorded; redelivery absorbed, no mutation.
    Duplicate,
    /// Interaction type carries no budget effect; no mutation.
    UnknownType(String),
    /// The referenced campaign does not exist or is soft-deleted; no
    /// mutation, not an error.
    CampaignMissing(i64),
}

impl ProcessOutcome {
    fn label(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::Duplicate => "duplicate",
            Self::UnknownType(_) => "unknown_type",
            Self::CampaignMissing(_) => "campaign_missing",
        }
    }
}

/// Runs the budget worker until the process exits.
///
/// Each cycle: wait for the interval tick, receive one batch, process its
/// messages sequentially, acknowledge each message whose processing
/// succeeded. Receive failures are logged and retried on the next tick.
pub async fn run_budget_worker(
    queue: Arc<dyn QueueTransport>,
    campaigns: Arc<dyn CampaignRepository>,
    processed: Arc<dyn ProcessedEventRepository>,
    settings: BudgetWorkerSettings,
) {
    let mut interval = tokio::time::interval(settings.poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(
        poll_interval_secs = settings.poll_interval.as_secs(),
        max_messages = settings.max_messages,
        budget_unit = settings.budget_unit,
        "budget worker started"
    );

    loop {
        interval.tick().await;
        poll_once(&*queue, &*campaigns, &*processed, &settings).await;
    }
}

/// One poll cycle: receive a batch and process it sequentially.
///
/// Returns the number of messages acknowledged, for tests and callers that
/// drive cycles manually.
pub async fn poll_once(
    queue: &dyn QueueTransport,
    campaigns: &dyn CampaignRepository,
    processed: &dyn ProcessedEventRepository,
    settings: &BudgetWorkerSettings,
) -> usize {
    let batch = match queue.receive(settings.max_messages, settings.wait_time).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(error = %e, "failed to receive from queue");
            return 0;
        }
    };

    let mut acknowledged = 0;

    for message in batch {
        match process_message(campaigns, processed, &message.body, settings.budget_unit).await {
            Ok(outcome) => {
                metrics::counter!("budget_events_processed", "outcome" => outcome.label())
                    .increment(1);

                match &outcome {
                    ProcessOutcome::Applied { campaign_id, delta } => {
                        tracing::info!(campaign_id, delta, "adjusted campaign budget");
                    }
                    ProcessOutcome::Duplicate => {
                        tracing::debug!(message_id = %message.message_id, "duplicate event, skipped");
                    }
                    ProcessOutcome::UnknownType(label) => {
                        tracing::warn!(interaction_type = %label, "unknown interaction type, no budget effect");
                    }
                    ProcessOutcome::CampaignMissing(campaign_id) => {
                        tracing::debug!(campaign_id, "campaign missing or deleted, event skipped");
                    }
                }

                if let Err(e) = queue.delete(&message.receipt_handle).await {
                    // The message will be redelivered; dedup absorbs the
                    // replay.
                    tracing::warn!(error = %e, message_id = %message.message_id, "failed to acknowledge message");
                } else {
                    acknowledged += 1;
                }
            }
            Err(e) => {
                // Leave the message unacknowledged: it becomes visible again
                // after the visibility timeout and is eventually
                // dead-lettered by the transport.
                metrics::counter!("budget_events_processed", "outcome" => "error").increment(1);
                tracing::warn!(
                    error = %e,
                    message_id = %message.message_id,
                    receive_count = message.receive_count,
                    "message processing failed, leaving for redelivery"
                );
            }
        }
    }

    acknowledged
}

/// Processes one message body: decode, dispatch on interaction type, dedup,
/// apply the delta atomically.
///
/// # Errors
///
/// Returns an error for malformed payloads and store failures; the caller
/// must then leave the message unacknowledged.
pub async fn process_message(
    campaigns: &dyn CampaignRepository,
    processed: &dyn ProcessedEventRepository,
    body: &str,
    budget_unit: i64,
) -> Result<ProcessOutcome, AppError> {
    let event: InteractionEvent = serde_json::from_str(body).map_err(|e| {
        AppError::bad_request(
            "Malformed event payload",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let Some(delta) = event.budget_delta(budget_unit) else {
        return Ok(ProcessOutcome::UnknownType(event.interaction_type));
    };

    // Check-before-apply: record the event id first so a redelivery of the
    // same message never applies the delta twice.
    if !processed.mark_processed(event.event_id).await? {
        return Ok(ProcessOutcome::Duplicate);
    }

    if campaigns.adjust_budget(event.campaign_id, delta).await? {
        Ok(ProcessOutcome::Applied {
            campaign_id: event.campaign_id,
            delta,
        })
    } else {
        Ok(ProcessOutcome::CampaignMissing(event.campaign_id))
    }
}

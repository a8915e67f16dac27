//! Queue publisher for interaction events.

use std::sync::Arc;

use crate::domain::interaction_event::InteractionEvent;
use crate::infrastructure::queue::QueueTransport;

/// Publishes interaction events to the queue after the interaction row has
/// been persisted.
///
/// Publishing is fire-and-forget from the caller's perspective: the HTTP
/// request already committed the interaction, so a transport failure is
/// logged and swallowed rather than surfaced. The interaction record and the
/// queue can therefore diverge; the budget simply never sees the lost event.
pub struct EventProducer {
    queue: Arc<dyn QueueTransport>,
}

impl EventProducer {
    pub fn new(queue: Arc<dyn QueueTransport>) -> Self {
        Self { queue }
    }

    /// Serializes and sends one event. Exactly one send attempt per call; no
    /// inline retry.
    pub async fn publish(&self, event: &InteractionEvent) {
        let body = match serde_json::to_string(event) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, event_id = %event.event_id, "failed to serialize interaction event");
                return;
            }
        };

        match self.queue.send(&body).await {
            Ok(message_id) => {
                metrics::counter!("interaction_events_published").increment(1);
                tracing::debug!(
                    message_id,
                    event_id = %event.event_id,
                    campaign_id = event.campaign_id,
                    interaction_type = %event.interaction_type,
                    "published interaction event"
                );
            }
            Err(e) => {
                metrics::counter!("interaction_events_publish_failed").increment(1);
                tracing::error!(
                    error = %e,
                    event_id = %event.event_id,
                    campaign_id = event.campaign_id,
                    "failed to publish interaction event"
                );
            }
        }
    }
}

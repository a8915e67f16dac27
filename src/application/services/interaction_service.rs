//! Interaction recording service.

use std::sync::Arc;

use crate::domain::entities::{Interaction, InteractionPatch, NewInteraction};
use crate::domain::event_producer::EventProducer;
use crate::domain::interaction_event::InteractionEvent;
use crate::domain::repositories::InteractionRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for recording and managing interactions.
///
/// Creation persists the interaction and then publishes exactly one queue
/// event for the budget worker. The publish happens after the row is
/// committed and its failure never rolls the row back: the client has
/// already been promised the interaction exists. Updates and deletes never
/// publish.
pub struct InteractionService<R: InteractionRepository + ?Sized> {
    repository: Arc<R>,
    producer: Arc<EventProducer>,
}

impl<R: InteractionRepository + ?Sized> InteractionService<R> {
    /// Creates a new interaction service.
    pub fn new(repository: Arc<R>, producer: Arc<EventProducer>) -> Self {
        Self {
            repository,
            producer,
        }
    }

    /// Persists an interaction, then publishes its event to the queue.
    pub async fn create_interaction(
        &self,
        new_interaction: NewInteraction,
    ) -> Result<Interaction, AppError> {
        let interaction = self.repository.create(new_interaction).await?;

        let event = InteractionEvent::from_interaction(&interaction);
        self.producer.publish(&event).await;

        Ok(interaction)
    }

    /// Lists interactions recorded against a campaign.
    pub async fn list_for_campaign(&self, campaign_id: i64) -> Result<Vec<Interaction>, AppError> {
        self.repository.list_by_campaign(campaign_id).await
    }

    /// Partially updates an interaction. No queue event is published.
    pub async fn update_interaction(
        &self,
        id: i64,
        patch: InteractionPatch,
    ) -> Result<Interaction, AppError> {
        self.repository.update(id, patch).await
    }

    /// Soft-deletes an interaction. No queue event is published.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the interaction does not exist or is
    /// already deleted.
    pub async fn delete_interaction(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.soft_delete(id).await? {
            return Err(AppError::not_found(
                "Interaction not found or already deleted",
                json!({ "id": id }),
            ));
        }
        Ok(())
    }
}

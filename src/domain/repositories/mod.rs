//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`CampaignRepository`] - Campaign CRUD and atomic budget adjustment
//! - [`InteractionRepository`] - Interaction recording and retrieval
//! - [`ProcessedEventRepository`] - Event-id dedup set for the budget worker
//! - [`TokenRepository`] - API token authentication

pub mod campaign_repository;
pub mod interaction_repository;
pub mod processed_event_repository;
pub mod token_repository;

pub use campaign_repository::CampaignRepository;
pub use interaction_repository::InteractionRepository;
pub use processed_event_repository::ProcessedEventRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
#[cfg(test)]
pub use interaction_repository::MockInteractionRepository;
#[cfg(test)]
pub use processed_event_repository::MockProcessedEventRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;

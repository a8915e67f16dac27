//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. The
//! soft-delete filter (`deleted_at IS NULL`) is applied here, in the SQL,
//! for every campaign and interaction query.
//!
//! # Repositories
//!
//! - [`PgCampaignRepository`] - Campaign storage and atomic budget adjustment
//! - [`PgInteractionRepository`] - Interaction storage and retrieval
//! - [`PgProcessedEventRepository`] - Event-id dedup set for the budget worker
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_campaign_repository;
pub mod pg_interaction_repository;
pub mod pg_processed_event_repository;
pub mod pg_token_repository;

pub use pg_campaign_repository::PgCampaignRepository;
pub use pg_interaction_repository::PgInteractionRepository;
pub use pg_processed_event_repository::PgProcessedEventRepository;
pub use pg_token_repository::PgTokenRepository;

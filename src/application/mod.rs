//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation, and business rules,
//! and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::campaign_service::CampaignService`] - Campaign CRUD
//! - [`services::interaction_service::InteractionService`] - Interaction
//!   recording with queue publishing
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;

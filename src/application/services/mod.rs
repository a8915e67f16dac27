//! Business logic services for the application layer.

pub mod auth_service;
pub mod campaign_service;
pub mod interaction_service;

pub use auth_service::AuthService;
pub use campaign_service::CampaignService;
pub use interaction_service::InteractionService;

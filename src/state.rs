//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, CampaignService, InteractionService};
use crate::domain::repositories::{CampaignRepository, InteractionRepository, TokenRepository};
use crate::infrastructure::queue::QueueTransport;

/// Handles shared across the HTTP layer.
///
/// Services are parameterized over trait objects so tests can wire in-memory
/// repositories behind the same state type the server uses.
#[derive(Clone)]
pub struct AppState {
    pub campaign_service: Arc<CampaignService<dyn CampaignRepository>>,
    pub interaction_service: Arc<InteractionService<dyn InteractionRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
    /// Queue handle, used directly only by the health check.
    pub queue: Arc<dyn QueueTransport>,
}

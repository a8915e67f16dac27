//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod campaigns;
pub mod health;
pub mod interactions;

pub use campaigns::{
    campaign_list_handler, create_campaign_handler, delete_campaign_handler, get_campaign_handler,
    update_campaign_handler,
};
pub use health::health_handler;
pub use interactions::{
    campaign_interactions_handler, create_interaction_handler, delete_interaction_handler,
    update_interaction_handler,
};

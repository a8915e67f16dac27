//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    campaign_interactions_handler, campaign_list_handler, create_campaign_handler,
    create_interaction_handler, delete_campaign_handler, delete_interaction_handler,
    get_campaign_handler, update_campaign_handler, update_interaction_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /campaigns`                    - List campaigns (paginated)
/// - `POST   /campaigns`                    - Create a campaign
/// - `GET    /campaigns/{id}`               - Retrieve a campaign
/// - `PATCH  /campaigns/{id}`               - Partially update a campaign
/// - `DELETE /campaigns/{id}`               - Soft-delete a campaign
/// - `GET    /campaigns/{id}/interactions`  - List a campaign's interactions
/// - `POST   /interactions`                 - Record an interaction (queues a budget event)
/// - `PATCH  /interactions/{id}`            - Partially update an interaction
/// - `DELETE /interactions/{id}`            - Soft-delete an interaction
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            get(campaign_list_handler).post(create_campaign_handler),
        )
        .route(
            "/campaigns/{id}",
            get(get_campaign_handler)
                .patch(update_campaign_handler)
                .delete(delete_campaign_handler),
        )
        .route(
            "/campaigns/{id}/interactions",
            get(campaign_interactions_handler),
        )
        .route("/interactions", post(create_interaction_handler))
        .route(
            "/interactions/{id}",
            patch(update_interaction_handler).delete(delete_interaction_handler),
        )
}

//! Handlers for interaction recording endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::interaction::{
    CreateInteractionRequest, InteractionListResponse, InteractionResponse,
    UpdateInteractionRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Records an interaction and queues its budget event.
///
/// # Endpoint
///
/// `POST /api/interactions`
///
/// # Request Body
///
/// ```json
/// { "campaign_id": 42, "user_id": 7, "interaction_type": "CLICK" }
/// ```
///
/// The interaction row is persisted first; one queue event is then published
/// for the budget worker. A publish failure is logged but does not fail this
/// request; the interaction stays recorded either way.
///
/// # Errors
///
/// Returns 400 Bad Request when validation fails.
pub async fn create_interaction_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateInteractionRequest>,
) -> Result<(StatusCode, Json<InteractionResponse>), AppError> {
    payload.validate()?;

    let interaction = state
        .interaction_service
        .create_interaction(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(interaction.into())))
}

/// Lists interactions recorded against a campaign, newest first.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}/interactions`
///
/// Returns an empty list for unknown campaign ids: interactions reference
/// campaigns without enforced integrity, so "no interactions" and "no such
/// campaign" are indistinguishable here by design.
pub async fn campaign_interactions_handler(
    Path(campaign_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<InteractionListResponse>, AppError> {
    let interactions = state
        .interaction_service
        .list_for_campaign(campaign_id)
        .await?;

    Ok(Json(InteractionListResponse {
        campaign_id,
        interactions: interactions
            .into_iter()
            .map(InteractionResponse::from)
            .collect(),
    }))
}

/// Partially updates an interaction.
///
/// # Endpoint
///
/// `PATCH /api/interactions/{id}`
///
/// Updating an interaction does NOT publish a queue event; budget effects
/// come only from the original create.
///
/// # Errors
///
/// Returns 404 Not Found for unknown or soft-deleted interactions.
pub async fn update_interaction_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateInteractionRequest>,
) -> Result<Json<InteractionResponse>, AppError> {
    payload.validate()?;

    let interaction = state
        .interaction_service
        .update_interaction(id, payload.into())
        .await?;

    Ok(Json(interaction.into()))
}

/// Soft-deletes an interaction.
///
/// # Endpoint
///
/// `DELETE /api/interactions/{id}`
///
/// Does not publish a queue event and does not revert any budget delta the
/// interaction may have caused.
///
/// # Errors
///
/// Returns 404 Not Found if the interaction doesn't exist or is already
/// deleted.
pub async fn delete_interaction_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.interaction_service.delete_interaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

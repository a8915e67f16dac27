//! Handlers for campaign management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::campaign::{
    CampaignListResponse, CampaignResponse, CreateCampaignRequest, UpdateCampaignRequest,
};
use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a campaign.
///
/// # Endpoint
///
/// `POST /api/campaigns`
///
/// # Request Body
///
/// ```json
/// { "name": "Summer Sale", "start_date": "2026-06-01",
///   "end_date": "2026-08-31", "budget": 100000 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request when validation fails (empty name, inverted date
/// range).
pub async fn create_campaign_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignResponse>), AppError> {
    payload.validate()?;

    let campaign = state.campaign_service.create_campaign(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(campaign.into())))
}

/// Lists campaigns, newest first, paginated.
///
/// # Endpoint
///
/// `GET /api/campaigns?page=1&page_size=25`
///
/// Soft-deleted campaigns are never included.
pub async fn campaign_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<CampaignListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, serde_json::json!({})))?;

    let (campaigns, total) = state.campaign_service.list_campaigns(offset, limit).await?;
    let (page, page_size) = params.effective();

    Ok(Json(CampaignListResponse {
        campaigns: campaigns.into_iter().map(CampaignResponse::from).collect(),
        total,
        page,
        page_size,
    }))
}

/// Retrieves a single campaign.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for unknown or soft-deleted campaigns.
pub async fn get_campaign_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CampaignResponse>, AppError> {
    let campaign = state.campaign_service.get_campaign(id).await?;
    Ok(Json(campaign.into()))
}

/// Partially updates a campaign.
///
/// # Endpoint
///
/// `PATCH /api/campaigns/{id}`
///
/// Only provided fields are changed. Setting `budget` here races benignly
/// with the budget worker: both go through the store, the last write to each
/// field wins, and worker deltas are atomic increments.
///
/// # Errors
///
/// Returns 404 Not Found for unknown or soft-deleted campaigns, 400 Bad
/// Request when validation fails.
pub async fn update_campaign_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> Result<Json<CampaignResponse>, AppError> {
    payload.validate()?;

    let campaign = state
        .campaign_service
        .update_campaign(id, payload.into())
        .await?;

    Ok(Json(campaign.into()))
}

/// Soft-deletes a campaign.
///
/// # Endpoint
///
/// `DELETE /api/campaigns/{id}`
///
/// The row is kept with `deleted_at` set; subsequent reads return 404 and the
/// budget worker stops adjusting it.
///
/// # Errors
///
/// Returns 404 Not Found if the campaign doesn't exist or is already deleted.
pub async fn delete_campaign_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.campaign_service.delete_campaign(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

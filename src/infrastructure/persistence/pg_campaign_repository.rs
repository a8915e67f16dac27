//! PostgreSQL implementation of campaign repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;
use serde_json::json;

const CAMPAIGN_COLUMNS: &str = "id, name, start_date, end_date, budget, created_at, deleted_at";

/// PostgreSQL repository for campaign storage and retrieval.
///
/// Every query carries the `deleted_at IS NULL` filter; soft-deleted
/// campaigns are invisible to reads, updates, and budget adjustment alike.
pub struct PgCampaignRepository {
    pool: Arc<PgPool>,
}

impl PgCampaignRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            INSERT INTO campaigns (name, start_date, end_date, budget)
            VALUES ($1, $2, $3, $4)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(&new_campaign.name)
        .bind(new_campaign.start_date)
        .bind(new_campaign.end_date)
        .bind(new_campaign.budget)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(campaign)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS}
            FROM campaigns
            WHERE id = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(campaign)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Campaign>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS}
            FROM campaigns
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(campaigns)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE deleted_at IS NULL")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: CampaignPatch) -> Result<Campaign, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            UPDATE campaigns
            SET name = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                budget = COALESCE($5, budget)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(patch.budget)
        .fetch_optional(self.pool.as_ref())
        .await?;

        campaign.ok_or_else(|| AppError::not_found("Campaign not found", json!({ "id": id })))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns
            SET deleted_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn adjust_budget(&self, id: i64, delta: i64) -> Result<bool, AppError> {
        // Single conditional update: no read-modify-write, so concurrent
        // workers cannot lose deltas.
        let result = sqlx::query(
            r#"
            UPDATE campaigns
            SET budget = budget + $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

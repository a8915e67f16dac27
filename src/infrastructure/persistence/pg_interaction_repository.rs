//! PostgreSQL implementation of interaction repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Interaction, InteractionPatch, NewInteraction};
use crate::domain::repositories::InteractionRepository;
use crate::error::AppError;
use serde_json::json;

const INTERACTION_COLUMNS: &str =
    r#"id, campaign_id, user_id, interaction_type, "timestamp", created_at, deleted_at"#;

/// PostgreSQL repository for interaction storage and retrieval.
pub struct PgInteractionRepository {
    pool: Arc<PgPool>,
}

impl PgInteractionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionRepository for PgInteractionRepository {
    async fn create(&self, new_interaction: NewInteraction) -> Result<Interaction, AppError> {
        // An absent timestamp means "now": COALESCE against the row's
        // creation time keeps the two identical in that case.
        let interaction = sqlx::query_as::<_, Interaction>(&format!(
            r#"
            INSERT INTO interactions (campaign_id, user_id, interaction_type, "timestamp")
            VALUES ($1, $2, $3, COALESCE($4, now()))
            RETURNING {INTERACTION_COLUMNS}
            "#
        ))
        .bind(new_interaction.campaign_id)
        .bind(new_interaction.user_id)
        .bind(&new_interaction.interaction_type)
        .bind(new_interaction.timestamp)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(interaction)
    }

    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Interaction>, AppError> {
        let interactions = sqlx::query_as::<_, Interaction>(&format!(
            r#"
            SELECT {INTERACTION_COLUMNS}
            FROM interactions
            WHERE campaign_id = $1 AND deleted_at IS NULL
            ORDER BY "timestamp" DESC, id DESC
            "#
        ))
        .bind(campaign_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(interactions)
    }

    async fn update(&self, id: i64, patch: InteractionPatch) -> Result<Interaction, AppError> {
        let interaction = sqlx::query_as::<_, Interaction>(&format!(
            r#"
            UPDATE interactions
            SET user_id = COALESCE($2, user_id),
                interaction_type = COALESCE($3, interaction_type),
                "timestamp" = COALESCE($4, "timestamp")
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {INTERACTION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.user_id)
        .bind(patch.interaction_type)
        .bind(patch.timestamp)
        .fetch_optional(self.pool.as_ref())
        .await?;

        interaction.ok_or_else(|| AppError::not_found("Interaction not found", json!({ "id": id })))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE interactions
            SET deleted_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! HTTP server initialization and runtime setup.
//!
//! Handles database connection (with bounded startup retries), migrations,
//! budget worker spawning, and Axum server lifecycle.

use crate::application::services::{AuthService, CampaignService, InteractionService};
use crate::config::Config;
use crate::domain::budget_worker::run_budget_worker;
use crate::domain::event_producer::EventProducer;
use crate::domain::repositories::{CampaignRepository, InteractionRepository, TokenRepository};
use crate::infrastructure::persistence::{
    PgCampaignRepository, PgInteractionRepository, PgProcessedEventRepository, PgTokenRepository,
};
use crate::infrastructure::queue::{PgQueue, QueueTransport};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::{Retry, strategy::FixedInterval};

/// Runs the HTTP server and budget worker with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (bounded retries, then fatal)
/// - Migrations
/// - PostgreSQL-backed queue transport
/// - Background budget worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after all retry attempts
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_with_retries(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);

    let queue: Arc<dyn QueueTransport> = Arc::new(PgQueue::new(
        pool.clone(),
        config.visibility_timeout(),
        config.queue_max_receive_count,
    ));

    let campaign_repository: Arc<dyn CampaignRepository> =
        Arc::new(PgCampaignRepository::new(pool.clone()));
    let interaction_repository: Arc<dyn InteractionRepository> =
        Arc::new(PgInteractionRepository::new(pool.clone()));
    let token_repository: Arc<dyn TokenRepository> = Arc::new(PgTokenRepository::new(pool.clone()));
    let processed_repository = Arc::new(PgProcessedEventRepository::new(pool.clone()));

    tokio::spawn(run_budget_worker(
        queue.clone(),
        campaign_repository.clone(),
        processed_repository,
        config.worker_settings(),
    ));
    tracing::info!("Budget worker started");

    let producer = Arc::new(EventProducer::new(queue.clone()));

    let state = AppState {
        campaign_service: Arc::new(CampaignService::new(campaign_repository)),
        interaction_service: Arc::new(InteractionService::new(interaction_repository, producer)),
        auth_service: Arc::new(AuthService::new(
            token_repository,
            config.token_signing_secret.clone(),
        )),
        queue,
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}

/// Connects to PostgreSQL with a fixed-delay, bounded retry policy.
///
/// `DB_CONNECT_ATTEMPTS` total attempts; exhausting them is fatal for the
/// process, matching the worker's startup discipline.
async fn connect_with_retries(config: &Config) -> Result<PgPool> {
    let retries = config.db_connect_attempts.saturating_sub(1);
    let strategy =
        FixedInterval::new(Duration::from_secs(config.db_connect_retry_delay)).take(retries);

    let pool = Retry::spawn(strategy, || async {
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(&config.database_url)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "database connection attempt failed"))
    })
    .await
    .with_context(|| {
        format!(
            "Failed to connect to database after {} attempts",
            config.db_connect_attempts
        )
    })?;

    Ok(pool)
}

#![allow(dead_code)]

//! Shared test fixtures: in-memory repository implementations and state
//! builders. No test in this suite requires a live database or network.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use campaign_tracker::application::services::auth_service::hash_token;
use campaign_tracker::application::services::{AuthService, CampaignService, InteractionService};
use campaign_tracker::domain::entities::{
    Campaign, CampaignPatch, Interaction, InteractionPatch, NewCampaign, NewInteraction,
};
use campaign_tracker::domain::repositories::{
    ApiToken, CampaignRepository, InteractionRepository, ProcessedEventRepository, TokenRepository,
};
use campaign_tracker::domain::event_producer::EventProducer;
use campaign_tracker::error::AppError;
use campaign_tracker::infrastructure::queue::{
    MemoryQueue, QueueError, QueueMessage, QueueResult, QueueTransport,
};
use campaign_tracker::state::AppState;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";
pub const TEST_TOKEN: &str = "test-token";

// ── Campaigns ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryCampaignRepository {
    next_id: AtomicI64,
    campaigns: Mutex<Vec<Campaign>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a campaign and returns its id.
    pub fn seed(&self, name: &str, budget: i64) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.campaigns.lock().unwrap().push(Campaign {
            id,
            name: name.to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            budget,
            created_at: Utc::now(),
            deleted_at: None,
        });
        id
    }

    /// Seeds an already soft-deleted campaign and returns its id.
    pub fn seed_deleted(&self, name: &str, budget: i64) -> i64 {
        let id = self.seed(name, budget);
        let mut campaigns = self.campaigns.lock().unwrap();
        campaigns.iter_mut().find(|c| c.id == id).unwrap().deleted_at = Some(Utc::now());
        id
    }

    /// Current budget of a campaign, soft-deleted included (test inspection).
    pub fn budget_of(&self, id: i64) -> Option<i64> {
        self.campaigns
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.budget)
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let campaign = Campaign {
            id,
            name: new_campaign.name,
            start_date: new_campaign.start_date,
            end_date: new_campaign.end_date,
            budget: new_campaign.budget,
            created_at: Utc::now(),
            deleted_at: None,
        };
        self.campaigns.lock().unwrap().push(campaign.clone());
        Ok(campaign)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Campaign>, AppError> {
        let campaigns = self.campaigns.lock().unwrap();
        let mut live: Vec<Campaign> = campaigns
            .iter()
            .filter(|c| c.deleted_at.is_none())
            .cloned()
            .collect();
        live.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(live
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.deleted_at.is_none())
            .count() as i64)
    }

    async fn update(&self, id: i64, patch: CampaignPatch) -> Result<Campaign, AppError> {
        let mut campaigns = self.campaigns.lock().unwrap();
        let campaign = campaigns
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Campaign not found", json!({ "id": id })))?;

        if let Some(name) = patch.name {
            campaign.name = name;
        }
        if let Some(start_date) = patch.start_date {
            campaign.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            campaign.end_date = end_date;
        }
        if let Some(budget) = patch.budget {
            campaign.budget = budget;
        }

        Ok(campaign.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut campaigns = self.campaigns.lock().unwrap();
        match campaigns
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
        {
            Some(campaign) => {
                campaign.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn adjust_budget(&self, id: i64, delta: i64) -> Result<bool, AppError> {
        let mut campaigns = self.campaigns.lock().unwrap();
        match campaigns
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
        {
            Some(campaign) => {
                campaign.budget += delta;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Interactions ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryInteractionRepository {
    next_id: AtomicI64,
    interactions: Mutex<Vec<Interaction>>,
}

impl InMemoryInteractionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InteractionRepository for InMemoryInteractionRepository {
    async fn create(&self, new_interaction: NewInteraction) -> Result<Interaction, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let interaction = Interaction {
            id,
            campaign_id: new_interaction.campaign_id,
            user_id: new_interaction.user_id,
            interaction_type: new_interaction.interaction_type,
            timestamp: new_interaction.timestamp.unwrap_or(now),
            created_at: now,
            deleted_at: None,
        };
        self.interactions.lock().unwrap().push(interaction.clone());
        Ok(interaction)
    }

    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Interaction>, AppError> {
        let interactions = self.interactions.lock().unwrap();
        let mut found: Vec<Interaction> = interactions
            .iter()
            .filter(|i| i.campaign_id == campaign_id && i.deleted_at.is_none())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(found)
    }

    async fn update(&self, id: i64, patch: InteractionPatch) -> Result<Interaction, AppError> {
        let mut interactions = self.interactions.lock().unwrap();
        let interaction = interactions
            .iter_mut()
            .find(|i| i.id == id && i.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Interaction not found", json!({ "id": id })))?;

        if let Some(user_id) = patch.user_id {
            interaction.user_id = user_id;
        }
        if let Some(interaction_type) = patch.interaction_type {
            interaction.interaction_type = interaction_type;
        }
        if let Some(timestamp) = patch.timestamp {
            interaction.timestamp = timestamp;
        }

        Ok(interaction.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut interactions = self.interactions.lock().unwrap();
        match interactions
            .iter_mut()
            .find(|i| i.id == id && i.deleted_at.is_none())
        {
            Some(interaction) => {
                interaction.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Processed events ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryProcessedEventRepository {
    seen: Mutex<HashSet<Uuid>>,
}

impl InMemoryProcessedEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProcessedEventRepository for InMemoryProcessedEventRepository {
    async fn mark_processed(&self, event_id: Uuid) -> Result<bool, AppError> {
        Ok(self.seen.lock().unwrap().insert(event_id))
    }
}

// ── Tokens ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryTokenRepository {
    next_id: AtomicI64,
    tokens: Mutex<Vec<ApiToken>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a valid token for `raw_token` hashed under the test secret.
    pub fn seed_token(&self, name: &str, raw_token: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.tokens.lock().unwrap().push(ApiToken {
            id,
            name: name.to_string(),
            token_hash: hash_token(TEST_SIGNING_SECRET, raw_token),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        });
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn validate_token(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.token_hash == token_hash && t.revoked_at.is_none()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        if let Some(token) = self
            .tokens
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(&self, name: &str, token_hash: &str) -> Result<ApiToken, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let token = ApiToken {
            id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        if let Some(token) = self.tokens.lock().unwrap().iter_mut().find(|t| t.id == id) {
            token.revoked_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ── Queue stubs ──────────────────────────────────────────────────────────────

/// A queue whose `send` always fails, for publish-failure tests.
pub struct FailingQueue;

#[async_trait]
impl QueueTransport for FailingQueue {
    async fn send(&self, _body: &str) -> QueueResult<String> {
        Err(QueueError::Transport("queue unreachable".to_string()))
    }

    async fn receive(
        &self,
        _max_messages: i64,
        _wait: std::time::Duration,
    ) -> QueueResult<Vec<QueueMessage>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _receipt_handle: &str) -> QueueResult<()> {
        Ok(())
    }

    async fn depth(&self) -> QueueResult<i64> {
        Ok(0)
    }
}

// ── State builders ───────────────────────────────────────────────────────────

pub struct TestContext {
    pub state: AppState,
    pub campaigns: Arc<InMemoryCampaignRepository>,
    pub interactions: Arc<InMemoryInteractionRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub queue: Arc<MemoryQueue>,
}

/// Builds an [`AppState`] over in-memory repositories and a [`MemoryQueue`],
/// with one valid API token (`TEST_TOKEN`) seeded.
pub fn test_context() -> TestContext {
    let campaigns = Arc::new(InMemoryCampaignRepository::new());
    let interactions = Arc::new(InMemoryInteractionRepository::new());
    let tokens = Arc::new(InMemoryTokenRepository::new());
    let queue = Arc::new(MemoryQueue::new(std::time::Duration::from_secs(30), 5));

    tokens.seed_token("test", TEST_TOKEN);

    let producer = Arc::new(EventProducer::new(queue.clone()));

    let campaign_repo: Arc<dyn CampaignRepository> = campaigns.clone();
    let interaction_repo: Arc<dyn InteractionRepository> = interactions.clone();
    let token_repo: Arc<dyn TokenRepository> = tokens.clone();

    let state = AppState {
        campaign_service: Arc::new(CampaignService::new(campaign_repo)),
        interaction_service: Arc::new(InteractionService::new(interaction_repo, producer)),
        auth_service: Arc::new(AuthService::new(
            token_repo,
            TEST_SIGNING_SECRET.to_string(),
        )),
        queue: queue.clone(),
    };

    TestContext {
        state,
        campaigns,
        interactions,
        tokens,
        queue,
    }
}

/// Same as [`test_context`], but the queue transport rejects every send.
pub fn test_context_with_failing_queue() -> TestContext {
    let ctx = test_context();
    let failing: Arc<dyn QueueTransport> = Arc::new(FailingQueue);
    let producer = Arc::new(EventProducer::new(failing));

    let interaction_repo: Arc<dyn InteractionRepository> = ctx.interactions.clone();
    let state = AppState {
        interaction_service: Arc::new(InteractionService::new(interaction_repo, producer)),
        ..ctx.state.clone()
    };

    TestContext { state, ..ctx }
}

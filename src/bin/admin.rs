//! CLI administration tool for campaign-tracker.
//!
//! Provides commands for managing API tokens, inspecting the queue, and
//! performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API token
//! cargo run --bin admin -- token create
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Production API"
//!
//! # View statistics (campaigns, interactions, queue depth, dead letters)
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): HMAC key matching
//!   the server's

use campaign_tracker::application::services::auth_service::hash_token;
use campaign_tracker::domain::repositories::TokenRepository;
use campaign_tracker::infrastructure::persistence::PgTokenRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use rand::{Rng, distr::Alphanumeric};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing campaign-tracker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Production API", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token by name
    Revoke {
        /// Token name to revoke
        name: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create { name, yes } => create_token(repo, name, yes).await?,
        TokenAction::List => list_tokens(repo).await?,
        TokenAction::Revoke { name } => revoke_token(repo, name).await?,
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// The raw token is displayed once and cannot be retrieved later; only its
/// HMAC-SHA256 hash (keyed by `TOKEN_SIGNING_SECRET`) is stored.
async fn create_token(repo: Arc<PgTokenRepository>, name: Option<String>, skip_confirm: bool) -> Result<()> {
    let signing_secret = std::env::var("TOKEN_SIGNING_SECRET")
        .context("TOKEN_SIGNING_SECRET must be set to create tokens")?;

    println!("{}", "Create API Token".bright_blue().bold());
    println!();

    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Token name").interact_text()?,
    };

    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect();

    println!("  Name:  {}", name.bright_white());
    println!("  Token: {}", token.bright_yellow());
    println!();
    println!(
        "{}",
        "The token is shown only once. Store it securely.".yellow()
    );

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted.".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(&signing_secret, &token);
    let created = repo.create_token(&name, &token_hash).await?;

    println!();
    println!("{} Token '{}' created (id {})", "✓".green(), created.name, created.id);
    println!();
    println!("Use it as:");
    println!("  Authorization: Bearer {token}");

    Ok(())
}

/// Prints all tokens with their status.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    let tokens = repo.list_tokens().await?;

    if tokens.is_empty() {
        println!("{}", "No tokens found.".yellow());
        return Ok(());
    }

    println!("{}", "API Tokens".bright_blue().bold());
    println!();

    for token in tokens {
        let status = if token.revoked_at.is_some() {
            "revoked".red()
        } else {
            "active".green()
        };

        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  [{}] {} ({}) created {}, last used {}",
            token.id,
            token.name.bright_white(),
            status,
            token.created_at.format("%Y-%m-%d"),
            last_used
        );
    }

    Ok(())
}

/// Revokes a token by name after confirmation.
async fn revoke_token(repo: Arc<PgTokenRepository>, name: String) -> Result<()> {
    let Some(token) = repo.find_by_name(&name).await? else {
        println!("{} No token named '{}'", "✗".red(), name);
        return Ok(());
    };

    if token.revoked_at.is_some() {
        println!("{} Token '{}' is already revoked", "!".yellow(), name);
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke token '{}' (id {})?", token.name, token.id))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Aborted.".red());
        return Ok(());
    }

    repo.revoke_token(token.id).await?;
    println!("{} Token '{}' revoked", "✓".green(), token.name);

    Ok(())
}

/// Prints campaign, interaction, and queue statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    let campaigns: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;
    let interactions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM interactions WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;
    let queue_depth: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queue_messages")
        .fetch_one(pool)
        .await?;
    let dead_letters: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dead_letter_messages")
        .fetch_one(pool)
        .await?;
    let processed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM processed_events")
        .fetch_one(pool)
        .await?;

    println!("{}", "Statistics".bright_blue().bold());
    println!();
    println!("  Campaigns (live):     {campaigns}");
    println!("  Interactions (live):  {interactions}");
    println!("  Queue depth:          {queue_depth}");
    println!("  Processed events:     {processed}");

    if dead_letters > 0 {
        println!("  Dead letters:         {}", dead_letters.to_string().red());
    } else {
        println!("  Dead letters:         0");
    }

    Ok(())
}

/// Dispatches database operation commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
            println!("{} Database connection OK", "✓".green());
        }
    }

    Ok(())
}

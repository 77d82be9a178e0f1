//! CLI administration tool for tinylink.
//!
//! Creates and inspects links directly against the PostgreSQL store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (optionally with a custom code)
//! cargo run --bin admin -- create https://example.com/long/path --code my-page
//!
//! # Most recent links
//! cargo run --bin admin -- recent --limit 20
//!
//! # One link with its click count
//! cargo run --bin admin -- show my-page
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), `PUBLIC_BASE_URL`,
//! `CODE_LENGTH`, `CODE_ATTEMPTS_PER_LENGTH`.

use tinylink::application::services::{DEFAULT_RECENT_LIMIT, LinkService};
use tinylink::config::{self, Config, StorageBackend};
use tinylink::domain::entities::Link;
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::{PgLinkRepository, connect_pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// Destination URL (http or https)
        url: String,

        /// Custom short code (3-32 of A-Z a-z 0-9 _ -)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List the most recently created links
    Recent {
        /// Number of links to show (1-100)
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT,
              value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: u32,
    },

    /// Show one link with its click count
    Show {
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool only works with STORAGE_BACKEND=postgres");
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        command => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;

            let service = link_service(&config, pool);
            handle_link_command(command, &service).await?;
        }
    }

    Ok(())
}

fn link_service(config: &Config, pool: PgPool) -> LinkService<dyn LinkRepository> {
    let repo: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    LinkService::new(repo, config.code_policy(), config.public_base_url.clone())
}

async fn handle_link_command(
    command: Commands,
    service: &LinkService<dyn LinkRepository>,
) -> Result<()> {
    match command {
        Commands::Create { url, code } => create_link(service, &url, code.as_deref()).await,
        Commands::Recent { limit } => list_recent(service, limit).await,
        Commands::Show { code } => show_link(service, &code).await,
        Commands::Db { .. } => Ok(()),
    }
}

async fn create_link(
    service: &LinkService<dyn LinkRepository>,
    url: &str,
    code: Option<&str>,
) -> Result<()> {
    println!("{}", "🔗 Create short link".bright_blue().bold());
    println!();

    let link = match service.create_short_link(url, code).await {
        Ok(link) => link,
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            anyhow::bail!("[{}] {}", e.error_code(), e);
        }
    };

    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  Short URL: {}", service.short_url(&link.code).cyan());
    println!("  Target:    {}", link.original_url);
    println!();
    println!("{}", "✅ Link created".green().bold());

    Ok(())
}

/// Prints recent links, newest first.
///
/// ```text
///   Code         Clicks  Created           Target
///   ──────────────────────────────────────────────────────────────
///   my-page          12  2026-01-15 10:30  https://example.com/long/path
/// ```
async fn list_recent(service: &LinkService<dyn LinkRepository>, limit: u32) -> Result<()> {
    println!("{}", "📋 Recent links".bright_blue().bold());
    println!();

    let links = service
        .list_recent(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:>7}  {:<16}  {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        print_row(link);
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());

    Ok(())
}

fn print_row(link: &Link) {
    println!(
        "  {:<12} {:>7}  {:<16}  {}",
        link.code.cyan(),
        link.clicks.to_string().bright_green(),
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black(),
        link.original_url
    );
}

async fn show_link(service: &LinkService<dyn LinkRepository>, code: &str) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No link with code '{code}'"))?;

    println!("{}", "🔎 Link".bright_blue().bold());
    println!();
    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  Short URL: {}", service.short_url(&link.code).cyan());
    println!("  Target:    {}", link.original_url);
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Clicks:    {}",
        link.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links stored: {}", links.to_string().bright_white());
        }
    }

    Ok(())
}

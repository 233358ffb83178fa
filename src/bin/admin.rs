//! CLI administration tool for minilink.
//!
//! Inspects stored links and statistics without going through the HTTP API,
//! and exposes the short code helpers for offline use.
//!
//! # Usage
//!
//! ```bash
//! # Look up a link
//! cargo run --bin admin -- link show k3x9qa
//!
//! # Most recent links
//! cargo run --bin admin -- link list --limit 50
//!
//! # Link and click totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Code helpers (no database needed)
//! cargo run --bin admin -- codec encode 123456
//! cargo run --bin admin -- codec decode 2n9c
//! cargo run --bin admin -- codec generate --count 5 --length 8
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `link`, `stats` and `db`): PostgreSQL connection string

use minilink::config::mask_connection_string;
use minilink::domain::entities::Link;
use minilink::domain::repositories::LinkRepository;
use minilink::infrastructure::persistence::PgLinkRepository;
use minilink::utils::code_generator::{
    DEFAULT_CODE_LENGTH, decode_base62, encode_base62, generate_code, is_reserved,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing minilink.
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
    /// Inspect stored links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show link and click totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Short code helpers
    Codec {
        #[command(subcommand)]
        action: CodecAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show a single link by short code
    Show {
        /// Short code to look up
        code: String,
    },

    /// List the most recently created links
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Subcommand)]
enum CodecAction {
    /// Encode a non-negative integer as a compact code
    Encode { value: u64 },

    /// Decode a compact code back to its integer
    Decode { code: String },

    /// Generate random short codes
    Generate {
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        #[arg(short, long, default_value_t = DEFAULT_CODE_LENGTH)]
        length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Codec { action } => handle_codec_action(action),
        Commands::Link { action } => handle_link_action(action, &connect().await?).await,
        Commands::Stats => handle_stats(&connect().await?).await,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await,
    }
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url).await.with_context(|| {
        format!(
            "Failed to connect to database at {}",
            mask_connection_string(&database_url)
        )
    })
}

fn repository(pool: &PgPool) -> PgLinkRepository {
    PgLinkRepository::new(Arc::new(pool.clone()))
}

/// Dispatches link inspection commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = repository(pool);

    match action {
        LinkAction::Show { code } => {
            let link = repo
                .find_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            match link {
                Some(link) => print_link(&link),
                None => println!("{} {}", "Link not found:".yellow(), code.cyan()),
            }
        }
        LinkAction::List { limit } => list_links(&repo, limit).await?,
    }

    Ok(())
}

fn print_link(link: &Link) {
    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  ID:       {}", link.id.to_string().bright_black());
    println!("  Code:     {}", link.short_code.cyan());
    println!("  URL:      {}", link.original_url.bright_white());
    println!(
        "  Clicks:   {}",
        link.click_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:  {}",
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Lists the most recent links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code       Clicks   Created            URL
///   ───────────────────────────────────────────────────────────────
///   k3x9qa     12       2026-01-15 10:30   https://example.com/page
/// ```
async fn list_links(repo: &PgLinkRepository, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = repo
        .list_recent(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<10} {:<8} {:<18} {}",
            link.short_code.cyan(),
            link.click_count.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let totals = repository(pool)
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load totals: {}", e))?;

    println!(
        "  Links:   {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:  {}",
        totals.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repository(pool)
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Runs the offline code helpers.
fn handle_codec_action(action: CodecAction) -> Result<()> {
    match action {
        CodecAction::Encode { value } => {
            println!("{}", encode_base62(value).cyan());
        }
        CodecAction::Decode { code } => {
            let value = decode_base62(&code)
                .with_context(|| format!("Cannot decode '{}'", code))?;
            println!("{}", value.to_string().cyan());
        }
        CodecAction::Generate { count, length } => {
            if length == 0 {
                anyhow::bail!("--length must be at least 1");
            }

            for _ in 0..count {
                let code = generate_code(length);
                if is_reserved(&code) {
                    println!("{} {}", code.yellow(), "(reserved)".bright_black());
                } else {
                    println!("{}", code.cyan());
                }
            }
        }
    }

    Ok(())
}

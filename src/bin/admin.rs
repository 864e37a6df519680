//! CLI administration tool for shop-accounts.
//!
//! Provides commands for managing accounts and refresh sessions, viewing
//! statistics, and performing database operations without HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List users
//! cargo run --bin admin -- users list
//!
//! # Delete a user by id or email
//! cargo run --bin admin -- users delete ada@example.com
//!
//! # Remove expired and revoked refresh sessions
//! cargo run --bin admin -- sessions purge
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use shop_accounts::config::Config;
use shop_accounts::domain::entities::User;
use shop_accounts::domain::repositories::{SessionRepository, UserRepository};
use shop_accounts::infrastructure::persistence::{PgSessionRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shop-accounts.
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
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage refresh sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// Delete a user with all addresses and sessions
    Delete {
        /// User ID or email
        id_or_email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Session management subcommands.
#[derive(Subcommand)]
enum SessionAction {
    /// Delete expired and revoked sessions
    Purge,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Users { action } => handle_user_action(action, &pool).await?,
        Commands::Sessions { action } => handle_session_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List => list_users(&repo).await?,
        UserAction::Delete { id_or_email, yes } => delete_user(&repo, id_or_email, yes).await?,
    }

    Ok(())
}

/// Lists all users, newest first.
///
/// # Output Format
///
/// ```text
/// Users
///
///   ID    Name                     Email                            Role    Created
///   ────────────────────────────────────────────────────────────────────────────────────
///   2     Grace Hopper             grace@example.com                admin   2025-01-16 14:20
///   1     Ada Lovelace             ada@example.com                  user    2025-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<24} {:<32} {:<7} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(84).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<24} {:<32} {:<7} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            user.role.as_str(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a user by id or email after confirmation (default: No).
async fn delete_user(
    repo: &PgUserRepository,
    id_or_email: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Delete User".bright_blue().bold());
    println!();

    let user = find_user(repo, &id_or_email)
        .await?
        .context("User not found")?;

    println!("  User:  {}", user.name.cyan());
    println!("  Email: {}", user.email);
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user with all addresses and sessions?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    repo.delete(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!("{}", "User deleted".green().bold());
    println!();

    Ok(())
}

/// Numeric input is treated as an id, anything else as an email.
async fn find_user(repo: &PgUserRepository, id_or_email: &str) -> Result<Option<User>> {
    let user = match id_or_email.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_email(id_or_email.trim()).await,
    };

    user.map_err(|e| anyhow::anyhow!("Database error: {}", e))
}

/// Dispatches session commands.
async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = PgSessionRepository::new(Arc::new(pool.clone()));

    match action {
        SessionAction::Purge => {
            let removed = repo
                .purge_inactive()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

            println!(
                "{} {}",
                "Removed sessions:".green().bold(),
                removed.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of users
/// - Total number of addresses
/// - Number of active refresh sessions
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let pool_arc = Arc::new(pool.clone());

    let users_count = PgUserRepository::new(pool_arc.clone())
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let addresses_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
        .fetch_one(pool)
        .await?;

    let sessions_count = PgSessionRepository::new(pool_arc)
        .count_active()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Users:           {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Addresses:       {}",
        addresses_count.to_string().bright_green().bold()
    );
    println!(
        "  Active sessions: {}",
        sessions_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_user` - Look up a user by username or email
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::db::Database;
use spendwise_core::models::User;

/// Open (and migrate) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    tracing::debug!(path = path_str, "Opening database");
    Database::open(path_str).context("Failed to open database")
}

/// Find a user by username or email, failing with a readable message
pub fn resolve_user(db: &Database, username_or_email: &str) -> Result<User> {
    db.find_user(username_or_email)?
        .with_context(|| format!("No user named '{}'", username_or_email))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let users = db.count_users()?;
    println!("   Registered users: {}", users);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Register a user: spendwise register -u alice -e alice@example.com -p <password>");
    println!("  2. Start the API: SPENDWISE_JWT_SECRET=<secret> spendwise serve");

    Ok(())
}

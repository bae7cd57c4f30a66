//! User command implementations

use anyhow::{Context, Result};
use spendwise_core::credentials;
use spendwise_core::db::Database;

pub fn cmd_register(db: &Database, username: &str, email: &str, password: &str) -> Result<()> {
    credentials::validate_new_password(password).context("Invalid password")?;
    let hash = credentials::hash_password(password).context("Failed to hash password")?;
    let user = db
        .create_user(username, email, &hash)
        .context("Failed to register user")?;

    println!("✅ Registered {} <{}> (id {})", user.username, user.email, user.id);
    Ok(())
}

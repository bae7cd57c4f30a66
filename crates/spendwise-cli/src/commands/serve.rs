//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use spendwise_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    config: ServerConfig,
) -> Result<()> {
    println!("🚀 Starting Spendwise web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    println!(
        "   🔒 Authentication: bearer tokens (valid {} days)",
        config.token_ttl_days
    );
    if config.allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", config.allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("Static dir path must be valid UTF-8"))
        .transpose()?;
    spendwise_server::serve(db, host, port, static_dir_str, config).await?;

    Ok(())
}

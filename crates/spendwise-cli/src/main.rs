//! Spendwise CLI - Shared expense tracker
//!
//! Usage:
//!   spendwise init                          Initialize database
//!   spendwise register -u NAME -e EMAIL -p PASSWORD
//!   spendwise expenses list --user NAME     List a user's expenses
//!   spendwise summary --user NAME           Totals, trends and insights
//!   spendwise serve --port 5000             Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve {
            port,
            host,
            static_dir,
            jwt_secret,
            token_ttl_days,
            allowed_origins,
        } => {
            let config = spendwise_server::ServerConfig {
                jwt_secret,
                token_ttl_days,
                allowed_origins,
            };
            commands::cmd_serve(&cli.db, &host, port, static_dir.as_deref(), config).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_register(&db, &username, &email, &password)
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                ExpensesAction::List { user, search } => {
                    commands::cmd_expenses_list(&db, &user, search.as_deref())
                }
                ExpensesAction::Add {
                    user,
                    description,
                    amount,
                    category,
                    date,
                    with,
                } => commands::cmd_expenses_add(
                    &db,
                    &user,
                    &description,
                    amount,
                    &category,
                    date.as_deref(),
                    &with,
                ),
                ExpensesAction::Delete { user, id } => commands::cmd_expenses_delete(&db, &user, id),
            }
        }
        Commands::Summary { user, json } => {
            let db = commands::open_db(&cli.db)?;
            let today = chrono::Local::now().date_naive();
            commands::cmd_summary(&db, &user, today, json)
        }
    }
}

//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwise - Track and split shared expenses
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Shared expense tracker with per-user spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, env = "SPENDWISE_DB", default_value = "spendwise.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory of a built frontend to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Secret for signing bearer tokens
        #[arg(long, env = "SPENDWISE_JWT_SECRET", hide_env_values = true)]
        jwt_secret: String,

        /// Bearer token lifetime in days
        #[arg(long, env = "SPENDWISE_TOKEN_TTL_DAYS", default_value = "30")]
        token_ttl_days: i64,

        /// Allowed CORS origins (comma-separated)
        #[arg(long, env = "SPENDWISE_ALLOWED_ORIGINS", value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },

    /// Register a new user
    Register {
        /// Unique username
        #[arg(short, long)]
        username: String,

        /// Unique email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },

    /// List or manage expenses
    Expenses {
        #[command(subcommand)]
        action: ExpensesAction,
    },

    /// Show totals, trends and insights for a user
    Summary {
        /// Username or email
        #[arg(short, long)]
        user: String,

        /// Print the aggregate view as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses visible to a user, with that user's share
    List {
        /// Username or email
        #[arg(short, long)]
        user: String,

        /// Only expenses whose description or category contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Record an expense paid by a user
    Add {
        /// Username or email of the payer
        #[arg(short, long)]
        user: String,

        /// What the money was spent on
        #[arg(short, long)]
        description: String,

        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Category: Food, Transport, Entertainment, Shopping, Bills, Health, Other
        #[arg(short, long, default_value = "Other")]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Usernames or emails sharing the cost (comma-separated)
        #[arg(long, value_delimiter = ',')]
        with: Vec<String>,
    },

    /// Delete an expense (payer only)
    Delete {
        /// Username or email of the payer
        #[arg(short, long)]
        user: String,

        /// Expense ID
        id: i64,
    },
}

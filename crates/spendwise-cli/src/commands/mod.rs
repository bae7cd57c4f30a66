//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, resolve_user)
//! - `expenses` - Expense commands (list, add, delete)
//! - `serve` - Web server command
//! - `summary` - Aggregated totals and insights
//! - `users` - User registration

pub mod core;
pub mod expenses;
pub mod serve;
pub mod summary;
pub mod users;

// Re-export command functions for main.rs
pub use core::*;
pub use expenses::*;
pub use serve::*;
pub use summary::*;
pub use users::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

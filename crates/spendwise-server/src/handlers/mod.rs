//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod insights;
pub mod users;

// Re-export all handlers for use in router
pub use auth::*;
pub use dashboard::*;
pub use expenses::*;
pub use insights::*;
pub use users::*;

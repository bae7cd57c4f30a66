//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise shared expense tracker:
//! - Cost attribution of shared expenses (`share`)
//! - Per-user aggregation into dashboard series (`aggregate`)
//! - Rule-based spending insights (`insights`)
//! - Password hashing (`credentials`)
//! - Database access and migrations (`db`)

pub mod aggregate;
pub mod credentials;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod share;

pub use aggregate::{
    AggregateView, CategoryPoint, ExpenseWithShare, MonthlyPoint, TREND_MONTHS,
};
pub use db::{Database, ExpenseFilter};
pub use error::{Error, Result};
pub use insights::{format_currency, Insight, InsightKind, Trend};
pub use models::{Category, Expense, ExpenseUpdate, NewExpense, User, UserId};
pub use share::share;

//! Per-user spending aggregates
//!
//! Everything here is a pure function of the visible expense collection, the
//! viewing user and the current date. Nothing is cached; callers rebuild the
//! view on every request.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Expense, UserId};
use crate::share::{share, with_shares};

/// Number of monthly buckets kept for trend views
pub const TREND_MONTHS: usize = 6;

/// One month of spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Sortable key, `YYYY-MM`
    pub period: String,
    /// Display label, e.g. `Jan 25`
    pub period_label: String,
    pub amount: f64,
}

/// Spending in one category label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPoint {
    pub category: String,
    pub amount: f64,
    pub color: String,
}

/// An expense with the viewing user's share attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseWithShare {
    #[serde(flatten)]
    pub expense: Expense,
    pub share: f64,
}

impl ExpenseWithShare {
    pub fn new(expense: Expense, user: UserId) -> Self {
        let share = share(&expense, user);
        Self { expense, share }
    }
}

/// Aggregated view of one user's visible expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateView {
    pub total_share: f64,
    pub this_month_total: f64,
    /// Expenses dated in the current month
    pub this_month_count: usize,
    pub record_count: usize,
    pub average_share: f64,
    /// Chronological, most recent `TREND_MONTHS` buckets only
    pub monthly_series: Vec<MonthlyPoint>,
    /// In order of first appearance
    pub category_series: Vec<CategoryPoint>,
}

impl AggregateView {
    /// Build the view with the default trend window
    pub fn build(expenses: &[Expense], user: UserId, today: NaiveDate) -> Self {
        Self::build_with_window(expenses, user, today, TREND_MONTHS)
    }

    pub fn build_with_window(
        expenses: &[Expense],
        user: UserId,
        today: NaiveDate,
        months: usize,
    ) -> Self {
        let shares = with_shares(expenses, user);

        let total_share: f64 = shares.iter().map(|(_, s)| s).sum();
        let record_count = shares.len();
        let average_share = if record_count > 0 {
            total_share / record_count as f64
        } else {
            0.0
        };

        let mut this_month_total = 0.0;
        let mut this_month_count = 0;
        for (expense, s) in &shares {
            if let Some(date) = expense.date {
                if date.year() == today.year() && date.month() == today.month() {
                    this_month_total += s;
                    this_month_count += 1;
                }
            }
        }

        let mut monthly_series = monthly_totals(&shares);
        if monthly_series.len() > months {
            monthly_series.drain(..monthly_series.len() - months);
        }

        tracing::debug!(
            user,
            record_count,
            months = monthly_series.len(),
            "Built aggregate view"
        );

        Self {
            total_share,
            this_month_total,
            this_month_count,
            record_count,
            average_share,
            monthly_series,
            category_series: category_totals(&shares),
        }
    }

    /// Category with the largest total.
    ///
    /// Ties go to the category seen first. `None` when there are no categories.
    pub fn top_category(&self) -> Option<&CategoryPoint> {
        let mut top: Option<&CategoryPoint> = None;
        for point in &self.category_series {
            match top {
                Some(current) if point.amount <= current.amount => {}
                _ => top = Some(point),
            }
        }
        top
    }
}

/// Sum shares per calendar month, oldest first.
///
/// Undated expenses are left out.
pub fn monthly_totals(shares: &[(&Expense, f64)]) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (expense, s) in shares {
        if let Some(date) = expense.date {
            *buckets.entry((date.year(), date.month())).or_insert(0.0) += s;
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), amount)| MonthlyPoint {
            period: format!("{:04}-{:02}", year, month),
            period_label: NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %y").to_string())
                .unwrap_or_default(),
            amount,
        })
        .collect()
}

/// Sum shares per category label, in order of first appearance
pub fn category_totals(shares: &[(&Expense, f64)]) -> Vec<CategoryPoint> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut points: Vec<CategoryPoint> = Vec::new();

    for (expense, s) in shares {
        let label = expense.category.as_str();
        match index.get(label) {
            Some(&i) => points[i].amount += s,
            None => {
                index.insert(label, points.len());
                points.push(CategoryPoint {
                    category: label.to_string(),
                    amount: *s,
                    color: Category::color_for(label).to_string(),
                });
            }
        }
    }

    points
}

/// The `n` expenses with the largest share for `user`, largest first
pub fn top_expenses(expenses: &[Expense], user: UserId, n: usize) -> Vec<ExpenseWithShare> {
    let mut ranked: Vec<ExpenseWithShare> = expenses
        .iter()
        .cloned()
        .map(|e| ExpenseWithShare::new(e, user))
        .collect();
    // Stable sort keeps store order among equal shares
    ranked.sort_by(|a, b| {
        b.share
            .partial_cmp(&a.share)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// The first `n` expenses in store order, with shares
pub fn recent(expenses: &[Expense], user: UserId, n: usize) -> Vec<ExpenseWithShare> {
    expenses
        .iter()
        .take(n)
        .cloned()
        .map(|e| ExpenseWithShare::new(e, user))
        .collect()
}

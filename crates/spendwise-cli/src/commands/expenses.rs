//! Expense command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendwise_core::db::{Database, ExpenseFilter};
use spendwise_core::models::{Category, NewExpense, UserId};
use spendwise_core::share::with_shares;

use super::{resolve_user, truncate};

pub fn cmd_expenses_list(db: &Database, user: &str, search: Option<&str>) -> Result<()> {
    let user = resolve_user(db, user)?;
    let expenses = db.search_visible(user.id, &ExpenseFilter::new().search(search))?;

    if expenses.is_empty() {
        if let Some(q) = search {
            println!("No expenses match '{}'.", q);
            return Ok(());
        }
        println!("No expenses found for {}. Add one with:", user.username);
        println!(
            "  spendwise expenses add --user {} --description Lunch --amount 250",
            user.username
        );
        return Ok(());
    }

    println!();
    println!("📝 Expenses for {}", user.username);
    println!("   ─────────────────────────────────────────────────────────────");

    for (expense, share) in with_shares(&expenses, user.id) {
        let date = expense
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());
        let paid = if expense.owner_id == user.id {
            "paid"
        } else {
            "    "
        };

        println!(
            "   {:>4} │ {} │ {:>10.2} │ {:>10.2} │ {} │ {:<13} │ {}",
            expense.id,
            date,
            expense.amount,
            share,
            paid,
            expense.category,
            truncate(&expense.description, 30)
        );
    }

    Ok(())
}

pub fn cmd_expenses_add(
    db: &Database,
    user: &str,
    description: &str,
    amount: f64,
    category: &str,
    date: Option<&str>,
    with: &[String],
) -> Result<()> {
    let owner = resolve_user(db, user)?;

    let category: Category = category.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let date = date
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --date format (use YYYY-MM-DD)")?;

    let participants = with
        .iter()
        .map(|name| resolve_user(db, name).map(|u| u.id))
        .collect::<Result<Vec<UserId>>>()?;

    let expense = db.create_expense(
        owner.id,
        &NewExpense {
            description: description.to_string(),
            amount,
            category,
            date,
            participants,
        },
    )?;

    println!(
        "✅ Recorded expense {} ({:.2}, split {} ways)",
        expense.id,
        expense.amount,
        expense.participants.len()
    );
    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    let user = resolve_user(db, user)?;
    db.delete_expense(id, user.id)?;

    println!("🗑️  Deleted expense {}", id);
    Ok(())
}

//! Spending summary command

use anyhow::Result;
use chrono::NaiveDate;
use spendwise_core::aggregate::AggregateView;
use spendwise_core::db::Database;
use spendwise_core::insights::{self, format_currency};

use super::resolve_user;

/// Width of the widest bar in the monthly chart
const BAR_WIDTH: f64 = 30.0;

pub fn cmd_summary(db: &Database, user: &str, today: NaiveDate, json: bool) -> Result<()> {
    let user = resolve_user(db, user)?;
    let expenses = db.find_visible(user.id)?;
    let view = AggregateView::build(&expenses, user.id, today);
    let generated = insights::generate(&view);

    if json {
        let out = serde_json::json!({
            "summary": view,
            "insights": generated,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         💰 Spendwise Summary            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  User:            {}", user.username);
    println!("  Total share:     {}", format_currency(view.total_share));
    println!(
        "  This month:      {} ({} expenses)",
        format_currency(view.this_month_total),
        view.this_month_count
    );
    println!("  Expenses:        {}", view.record_count);
    println!("  Average share:   {}", format_currency(view.average_share));

    if !view.monthly_series.is_empty() {
        println!();
        println!("  📈 Monthly Trend");
        let max = view
            .monthly_series
            .iter()
            .map(|m| m.amount)
            .fold(0.0_f64, f64::max);
        for point in &view.monthly_series {
            let len = if max > 0.0 {
                (point.amount / max * BAR_WIDTH).round() as usize
            } else {
                0
            };
            println!(
                "     {} │ {:<30} {}",
                point.period_label,
                "█".repeat(len),
                format_currency(point.amount)
            );
        }
    }

    if !view.category_series.is_empty() {
        println!();
        println!("  🏷️  By Category");
        for point in &view.category_series {
            println!(
                "     {:<14} {}",
                point.category,
                format_currency(point.amount)
            );
        }
    }

    println!();
    println!("  💡 Insights");
    for insight in &generated {
        println!("     {}: {}", insight.title, insight.body);
    }
    println!();

    Ok(())
}

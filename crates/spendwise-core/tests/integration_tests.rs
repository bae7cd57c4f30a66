//! Integration tests for spendwise-core
//!
//! These tests exercise the full record → load visible → aggregate → insights workflow.

use chrono::NaiveDate;
use spendwise_core::{
    aggregate, credentials, db::Database, insights, AggregateView, Category, InsightKind,
    NewExpense, UserId,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn register(db: &Database, name: &str) -> UserId {
    let hash = credentials::hash_password("hunter22").expect("Failed to hash password");
    db.create_user(name, &format!("{}@example.com", name), &hash)
        .expect("Failed to create user")
        .id
}

fn record(
    db: &Database,
    owner: UserId,
    amount: f64,
    category: Category,
    on: NaiveDate,
    participants: Vec<UserId>,
) {
    db.create_expense(
        owner,
        &NewExpense {
            description: format!("{} on {}", category, on),
            amount,
            category,
            date: Some(on),
            participants,
        },
    )
    .expect("Failed to create expense");
}

// =============================================================================
// Database Integration Tests
// =============================================================================

#[test]
fn test_shared_dinner_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let alice = register(&db, "alice");
    let bob = register(&db, "bob");
    let carol = register(&db, "carol");

    // Alice pays for dinner for three in March
    record(&db, alice, 300.0, Category::Food, date(2025, 3, 2), vec![bob, carol]);
    // Bob takes a solo cab in April
    record(&db, bob, 120.0, Category::Transport, date(2025, 4, 10), vec![]);
    // Bob and Alice split a bill in April
    record(&db, bob, 1000.0, Category::Bills, date(2025, 4, 12), vec![alice]);

    let today = date(2025, 4, 20);

    let alice_expenses = db.find_visible(alice).unwrap();
    assert_eq!(alice_expenses.len(), 2);
    let alice_view = AggregateView::build(&alice_expenses, alice, today);
    assert_eq!(alice_view.total_share, 600.0);
    assert_eq!(alice_view.this_month_total, 500.0);
    assert_eq!(alice_view.this_month_count, 1);
    assert_eq!(alice_view.average_share, 300.0);

    let periods: Vec<&str> = alice_view
        .monthly_series
        .iter()
        .map(|m| m.period.as_str())
        .collect();
    assert_eq!(periods, vec!["2025-03", "2025-04"]);

    let bob_expenses = db.find_visible(bob).unwrap();
    let bob_view = AggregateView::build(&bob_expenses, bob, today);
    assert_eq!(bob_view.record_count, 3);
    assert_eq!(bob_view.total_share, 720.0);
    let top = bob_view.top_category().unwrap();
    assert_eq!(top.category, "Bills");
    assert_eq!(top.color, Category::Bills.color());

    let carol_view = AggregateView::build(&db.find_visible(carol).unwrap(), carol, today);
    assert_eq!(carol_view.total_share, 100.0);
    assert_eq!(carol_view.this_month_total, 0.0);
}

#[test]
fn test_shares_sum_to_amount_across_participants() {
    let db = Database::in_memory().unwrap();
    let users: Vec<UserId> = ["u1", "u2", "u3"].iter().map(|n| register(&db, n)).collect();

    record(&db, users[0], 100.0, Category::Shopping, date(2025, 1, 5), users[1..].to_vec());

    let expense = &db.find_visible(users[0]).unwrap()[0];
    let total: f64 = users
        .iter()
        .map(|u| spendwise_core::share(expense, *u))
        .sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_insights_from_stored_expenses() {
    let db = Database::in_memory().unwrap();
    let alice = register(&db, "alice");

    record(&db, alice, 200.0, Category::Food, date(2025, 1, 10), vec![]);
    record(&db, alice, 500.0, Category::Entertainment, date(2025, 2, 10), vec![]);

    let expenses = db.find_visible(alice).unwrap();
    let view = AggregateView::build(&expenses, alice, date(2025, 2, 15));
    let generated = insights::generate(&view);

    assert_eq!(generated.len(), 3);
    assert_eq!(generated[0].kind, InsightKind::TopCategory);
    assert!(generated[0].body.contains("Entertainment (₹500.00)"));
    assert!(generated[1].body.contains("increased"));
    assert!(generated[2].body.contains("₹350.00"));
}

#[test]
fn test_new_user_sees_empty_dashboard() {
    let db = Database::in_memory().unwrap();
    let alice = register(&db, "alice");

    let expenses = db.find_visible(alice).unwrap();
    let view = AggregateView::build(&expenses, alice, date(2025, 2, 15));
    assert_eq!(view.record_count, 0);
    assert_eq!(view.average_share, 0.0);
    assert!(view.monthly_series.is_empty());
    assert!(aggregate::top_expenses(&expenses, alice, 5).is_empty());

    let generated = insights::generate(&view);
    assert_eq!(generated[0].body, "No spending recorded yet.");
}

#[test]
fn test_login_credentials_roundtrip() {
    let db = Database::in_memory().unwrap();
    register(&db, "dana");

    let creds = db
        .get_user_credentials_by_email("DANA@example.com")
        .unwrap()
        .expect("user should exist");
    assert!(credentials::verify_password("hunter22", &creds.password_hash).unwrap());
    assert!(!credentials::verify_password("hunter23", &creds.password_hash).unwrap());
}

#[test]
fn test_reopen_keeps_data_and_migrations_are_idempotent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("spendwise.db");
    let path = path.to_str().unwrap();

    let alice = {
        let db = Database::open(path).expect("Failed to open database");
        let alice = register(&db, "alice");
        record(&db, alice, 42.0, Category::Health, date(2025, 5, 1), vec![]);
        alice
    };

    let db = Database::open(path).expect("Failed to reopen database");
    assert_eq!(db.path(), path);
    assert_eq!(db.count_users().unwrap(), 1);
    let expenses = db.find_visible(alice).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, "Health");
}

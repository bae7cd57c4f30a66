//! Database tests

use super::*;
use crate::error::Error;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rusqlite::params;

    fn user(db: &Database, name: &str) -> UserId {
        db.create_user(name, &format!("{}@example.com", name), "hash")
            .unwrap()
            .id
    }

    fn new_expense(amount: f64, participants: Vec<UserId>) -> NewExpense {
        NewExpense {
            description: "Groceries".to_string(),
            amount,
            category: Category::Food,
            date: NaiveDate::from_ymd_opt(2025, 1, 15),
            participants,
        }
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('expenses') WHERE name IN ('id', 'description', 'amount', 'category', 'date', 'owner_id', 'created_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 7, "expenses table should have 7 expected columns");
    }

    #[test]
    fn test_create_and_lookup_user() {
        let db = Database::in_memory().unwrap();
        let created = db
            .create_user("alice", " Alice@Example.com ", "phc-hash")
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.email, "alice@example.com");

        let by_email = db.get_user_by_email("ALICE@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let creds = db
            .get_user_credentials_by_email("alice@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(creds.password_hash, "phc-hash");

        assert_eq!(db.find_user("alice").unwrap().unwrap().id, created.id);
        assert!(db.get_user(created.id + 100).unwrap().is_none());
        assert_eq!(db.count_users().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let db = Database::in_memory().unwrap();
        db.create_user("bob", "bob@example.com", "h").unwrap();

        let same_email = db.create_user("bobby", "BOB@example.com", "h");
        assert!(matches!(same_email, Err(Error::Conflict(_))));

        let same_name = db.create_user("bob", "other@example.com", "h");
        assert!(matches!(same_name, Err(Error::Conflict(_))));
    }

    #[test]
    fn test_create_expense_adds_owner_to_participants() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");
        let b = user(&db, "b");

        let shared = db.create_expense(a, &new_expense(300.0, vec![b, b])).unwrap();
        assert_eq!(shared.participants, vec![b, a]);
        assert_eq!(shared.owner_id, a);
        assert_eq!(shared.category, "Food");

        let solo = db.create_expense(a, &new_expense(20.0, vec![])).unwrap();
        assert_eq!(solo.participants, vec![a]);
    }

    #[test]
    fn test_create_expense_defaults_date_to_today() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");

        let mut expense = new_expense(5.0, vec![]);
        expense.date = None;
        let created = db.create_expense(a, &expense).unwrap();
        assert_eq!(created.date, Some(chrono::Local::now().date_naive()));
    }

    #[test]
    fn test_create_expense_rejects_unknown_participant() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");

        let result = db.create_expense(a, &new_expense(10.0, vec![9999]));
        assert!(matches!(result, Err(Error::InvalidData(_))));
        assert!(db.find_visible(a).unwrap().is_empty());
    }

    #[test]
    fn test_create_expense_rejects_negative_amount() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");
        let result = db.create_expense(a, &new_expense(-1.0, vec![]));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_find_visible_owner_or_participant() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");
        let b = user(&db, "b");
        let c = user(&db, "c");

        let e1 = db.create_expense(a, &new_expense(10.0, vec![])).unwrap();
        let e2 = db.create_expense(b, &new_expense(20.0, vec![a])).unwrap();
        let e3 = db.create_expense(b, &new_expense(30.0, vec![c])).unwrap();

        let for_a: Vec<i64> = db.find_visible(a).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(for_a, vec![e1.id, e2.id]);

        let for_c = db.find_visible(c).unwrap();
        assert_eq!(for_c.len(), 1);
        assert_eq!(for_c[0].id, e3.id);
        assert_eq!(for_c[0].participants, vec![c, b]);

        let for_b: Vec<i64> = db.find_visible(b).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(for_b, vec![e2.id, e3.id]);
    }

    #[test]
    fn test_owner_outside_participants_still_visible() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");
        let b = user(&db, "b");

        let e = db.create_expense(a, &new_expense(40.0, vec![b])).unwrap();
        // Drop the owner from the participant set directly
        db.conn()
            .unwrap()
            .execute(
                "DELETE FROM expense_participants WHERE expense_id = ? AND user_id = ?",
                params![e.id, a],
            )
            .unwrap();

        let visible = db.find_visible(a).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].participants, vec![b]);
        assert_eq!(crate::share::share(&visible[0], a), 0.0);
    }

    #[test]
    fn test_update_is_partial_and_owner_only() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");
        let b = user(&db, "b");
        let e = db.create_expense(a, &new_expense(100.0, vec![b])).unwrap();

        let update = ExpenseUpdate {
            amount: Some(0.0),
            category: Some(Category::Bills),
            ..Default::default()
        };
        let updated = db.update_expense(e.id, a, &update).unwrap();
        assert_eq!(updated.amount, 0.0);
        assert_eq!(updated.category, "Bills");
        assert_eq!(updated.description, "Groceries");
        assert_eq!(updated.date, e.date);
        assert_eq!(updated.participants, e.participants);

        let denied = db.update_expense(e.id, b, &update);
        assert!(matches!(denied, Err(Error::Forbidden(_))));

        let missing = db.update_expense(e.id + 1000, a, &update);
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_is_owner_only_and_hard() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");
        let b = user(&db, "b");
        let e = db.create_expense(a, &new_expense(60.0, vec![b])).unwrap();

        assert!(matches!(
            db.delete_expense(e.id, b),
            Err(Error::Forbidden(_))
        ));

        db.delete_expense(e.id, a).unwrap();
        assert!(db.get_expense(e.id).unwrap().is_none());
        assert!(db.find_visible(b).unwrap().is_empty());

        let conn = db.conn().unwrap();
        let leftover: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM expense_participants WHERE expense_id = ?",
                params![e.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(leftover, 0);
    }

    #[test]
    fn test_bad_stored_date_reads_as_none() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "a");
        let e = db.create_expense(a, &new_expense(10.0, vec![])).unwrap();

        db.conn()
            .unwrap()
            .execute(
                "UPDATE expenses SET date = 'not a date' WHERE id = ?",
                params![e.id],
            )
            .unwrap();

        let reloaded = db.get_expense(e.id).unwrap().unwrap();
        assert_eq!(reloaded.date, None);
    }

    #[test]
    fn test_numeric_stored_date_reads_as_none() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "alice");
        let e = db.create_expense(a, &new_expense(10.0, vec![])).unwrap();

        let conn = db.conn().unwrap();
        conn.execute(
            "UPDATE expenses SET date = '20250105' WHERE id = ?",
            params![e.id],
        )
        .unwrap();
        let stored_type: String = conn
            .query_row(
                "SELECT typeof(date) FROM expenses WHERE id = ?",
                params![e.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(stored_type, "integer");
        drop(conn);

        let visible = db.find_visible(a).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].date, None);
        assert_eq!(db.get_expense(e.id).unwrap().unwrap().date, None);
    }

    #[test]
    fn test_search_visible_filters() {
        let db = Database::in_memory().unwrap();
        let a = user(&db, "alice");
        let b = user(&db, "bob");

        let mut dinner = new_expense(60.0, vec![b]);
        dinner.description = "Team Dinner".to_string();
        db.create_expense(a, &dinner).unwrap();

        let mut cab = new_expense(30.0, vec![]);
        cab.description = "Airport cab".to_string();
        cab.category = Category::Transport;
        db.create_expense(a, &cab).unwrap();

        let mut discount = new_expense(5.0, vec![]);
        discount.description = "100% refund".to_string();
        db.create_expense(b, &discount).unwrap();

        let search = |who: UserId, q: &str| {
            db.search_visible(who, &ExpenseFilter::new().search(Some(q)))
                .unwrap()
                .into_iter()
                .map(|e| e.description)
                .collect::<Vec<_>>()
        };

        assert_eq!(search(a, "dinner"), vec!["Team Dinner"]);
        assert_eq!(search(a, "TRANSPORT"), vec!["Airport cab"]);
        // Visibility still applies: bob sees the shared dinner and his own refund
        assert_eq!(search(b, "e"), vec!["Team Dinner", "100% refund"]);
        // Wildcards in the query match literally
        assert_eq!(search(b, "0%"), vec!["100% refund"]);
        assert!(search(a, "%").is_empty());
        assert_eq!(search(a, "  ").len(), 2);

        let food = db
            .search_visible(a, &ExpenseFilter::new().category(Some(Category::Food)))
            .unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].participants, vec![b, a]);
    }

    #[test]
    fn test_unique_violation_on_insert_is_conflict() {
        let db = Database::in_memory().unwrap();
        // Stands in for a registration that lands between the existence check and the insert
        db.conn()
            .unwrap()
            .execute_batch("CREATE UNIQUE INDEX idx_test_hash ON users(password_hash);")
            .unwrap();

        db.create_user("alice", "alice@example.com", "same-hash")
            .unwrap();
        let result = db.create_user("bob", "bob@example.com", "same-hash");
        assert!(matches!(result, Err(Error::Conflict(_))));
        assert_eq!(db.count_users().unwrap(), 1);
    }
}

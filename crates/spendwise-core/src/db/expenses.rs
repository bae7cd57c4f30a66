//! Expense operations
//!
//! Only the owner may update or delete an expense. Deletes are hard deletes.

use std::collections::HashMap;

use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{parse_date, parse_datetime, Database, DbConn, ExpenseFilter};
use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseUpdate, NewExpense, UserId};

// `date` has NUMERIC affinity, so digit-only values come back as integers unless cast
const EXPENSE_COLUMNS: &str =
    "e.id, e.description, e.amount, e.category, CAST(e.date AS TEXT), e.owner_id, e.created_at";

impl Database {
    /// Record a new expense owned by `owner`.
    ///
    /// Participants are deduplicated and always include the owner. Every
    /// participant must be a registered user.
    pub fn create_expense(&self, owner: UserId, expense: &NewExpense) -> Result<Expense> {
        expense.validate()?;

        let participants = expense.participants_for(owner);
        if !self.users_exist(&participants)? {
            return Err(Error::InvalidData(
                "participants must be registered users".to_string(),
            ));
        }

        let date = expense
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO expenses (description, amount, category, date, owner_id) VALUES (?, ?, ?, ?, ?)",
            params![
                expense.description.trim(),
                expense.amount,
                expense.category.as_str(),
                date.to_string(),
                owner,
            ],
        )?;
        let id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO expense_participants (expense_id, user_id) VALUES (?, ?)",
            )?;
            for user_id in &participants {
                stmt.execute(params![id, user_id])?;
            }
        }
        tx.commit()?;

        info!(
            expense_id = id,
            owner,
            amount = expense.amount,
            participants = participants.len(),
            "Created expense"
        );

        self.get_expense(id)?
            .ok_or_else(|| Error::NotFound(format!("expense {} after insert", id)))
    }

    /// Get an expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("SELECT {} FROM expenses e WHERE e.id = ?", EXPENSE_COLUMNS),
                params![id],
                Self::row_to_expense,
            )
            .optional()?;

        match expense {
            Some(mut expense) => {
                expense.participants = Self::participants_of(&conn, id)?;
                Ok(Some(expense))
            }
            None => Ok(None),
        }
    }

    /// Every expense `user` owns or participates in, in creation order
    pub fn find_visible(&self, user: UserId) -> Result<Vec<Expense>> {
        self.search_visible(user, &ExpenseFilter::default())
    }

    /// Visible expenses narrowed by `filter`, in creation order
    pub fn search_visible(&self, user: UserId, filter: &ExpenseFilter<'_>) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let visible = "(e.owner_id = ?1 OR EXISTS (SELECT 1 FROM expense_participants vp WHERE vp.expense_id = e.id AND vp.user_id = ?1))";
        let filter = filter.build();

        let mut query_params: Vec<&dyn rusqlite::ToSql> = vec![&user];
        query_params.extend(filter.params.iter().map(|p| p.as_ref()));

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses e WHERE {}{} ORDER BY e.id",
            EXPENSE_COLUMNS, visible, filter.conditions
        ))?;
        let mut expenses = stmt
            .query_map(query_params.as_slice(), Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // One query for all participant lists
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT p.expense_id, p.user_id
            FROM expense_participants p
            JOIN expenses e ON e.id = p.expense_id
            WHERE {}
            ORDER BY p.rowid
            "#,
            visible
        ))?;
        let mut by_expense: HashMap<i64, Vec<UserId>> = HashMap::new();
        let rows = stmt.query_map(params![user], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, UserId>(1)?))
        })?;
        for row in rows {
            let (expense_id, user_id) = row?;
            by_expense.entry(expense_id).or_default().push(user_id);
        }

        for expense in &mut expenses {
            expense.participants = by_expense.remove(&expense.id).unwrap_or_default();
        }

        debug!(user, count = expenses.len(), "Loaded visible expenses");
        Ok(expenses)
    }

    /// Apply a partial update; fields left as `None` are unchanged
    pub fn update_expense(&self, id: i64, user: UserId, update: &ExpenseUpdate) -> Result<Expense> {
        self.require_owner(id, user, "update")?;
        update.validate()?;

        if !update.is_empty() {
            let conn = self.conn()?;
            conn.execute(
                r#"
                UPDATE expenses SET
                    description = COALESCE(?1, description),
                    amount = COALESCE(?2, amount),
                    category = COALESCE(?3, category),
                    date = COALESCE(?4, date),
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = ?5
                "#,
                params![
                    update.description.as_deref().map(str::trim),
                    update.amount,
                    update.category.map(|c| c.as_str()),
                    update.date.map(|d| d.to_string()),
                    id,
                ],
            )?;
            info!(expense_id = id, user, "Updated expense");
        }

        self.get_expense(id)?
            .ok_or_else(|| Error::NotFound("Expense not found".to_string()))
    }

    /// Delete an expense owned by `user`
    pub fn delete_expense(&self, id: i64, user: UserId) -> Result<()> {
        self.require_owner(id, user, "delete")?;

        let conn = self.conn()?;
        conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;

        info!(expense_id = id, user, "Deleted expense");
        Ok(())
    }

    fn require_owner(&self, id: i64, user: UserId, action: &str) -> Result<Expense> {
        let expense = self
            .get_expense(id)?
            .ok_or_else(|| Error::NotFound("Expense not found".to_string()))?;

        if expense.owner_id != user {
            return Err(Error::Forbidden(format!(
                "Not authorized to {} this expense",
                action
            )));
        }
        Ok(expense)
    }

    fn participants_of(conn: &DbConn, expense_id: i64) -> Result<Vec<UserId>> {
        let mut stmt = conn.prepare(
            "SELECT user_id FROM expense_participants WHERE expense_id = ? ORDER BY rowid",
        )?;
        let ids = stmt
            .query_map(params![expense_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
        let id: i64 = row.get(0)?;
        let date: Option<String> = row.get(4)?;
        let created_at: String = row.get(6)?;
        Ok(Expense {
            id,
            description: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            date: parse_date(date, id),
            owner_id: row.get(5)?,
            participants: Vec::new(),
            created_at: parse_datetime(&created_at),
        })
    }
}

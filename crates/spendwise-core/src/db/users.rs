//! User operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{User, UserCredentials, UserId};

const USER_COLUMNS: &str = "id, username, email, created_at";

impl Database {
    /// Create a user. Username and email must both be unused.
    pub fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<User> {
        let username = username.trim();
        let email = normalize_email(email);
        if username.is_empty() || email.is_empty() {
            return Err(Error::InvalidData(
                "username and email are required".to_string(),
            ));
        }

        let conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ? OR username = ?",
                params![email, username],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(Error::Conflict("User already exists".to_string()));
        }

        // A concurrent registration can still win the race after the check above
        match conn.execute(
            "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)",
            params![username, email, password_hash],
        ) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(Error::Conflict("User already exists".to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        let id = conn.last_insert_rowid();

        tracing::info!(user_id = id, username, "Registered user");

        self.get_user(id)?
            .ok_or_else(|| Error::NotFound(format!("user {} after insert", id)))
    }

    /// Get a user by ID
    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
            params![id],
            Self::row_to_user,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Get a user by email (case-insensitive)
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
            params![normalize_email(email)],
            Self::row_to_user,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Find a user by username or email
    pub fn find_user(&self, username_or_email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let needle = username_or_email.trim();
        conn.query_row(
            &format!(
                "SELECT {} FROM users WHERE username = ?1 OR email = ?2",
                USER_COLUMNS
            ),
            params![needle, normalize_email(needle)],
            Self::row_to_user,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Get a user together with the stored password hash (for login)
    pub fn get_user_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "SELECT {}, password_hash FROM users WHERE email = ?",
                USER_COLUMNS
            ),
            params![normalize_email(email)],
            |row| {
                Ok(UserCredentials {
                    user: Self::row_to_user(row)?,
                    password_hash: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }

    /// Whether every id refers to an existing user
    pub fn users_exist(&self, ids: &[UserId]) -> Result<bool> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT 1 FROM users WHERE id = ?")?;
        for id in ids {
            if !stmt.exists(params![id])? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Number of registered users
    pub fn count_users(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
    }

    fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
        let created_at: String = row.get(3)?;
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            created_at: parse_datetime(&created_at),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

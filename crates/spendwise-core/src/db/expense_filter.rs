//! Expense list filter builder
//!
//! Produces the extra WHERE conditions for `Database::search_visible`. The
//! visibility clause binds the caller as `?1`, so filter parameters are
//! numbered from `?2`.

use crate::models::Category;

/// Optional narrowing of a user's visible expenses
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpenseFilter<'query> {
    /// Case-insensitive substring of the description or category label
    pub search: Option<&'query str>,
    pub category: Option<Category>,
}

/// SQL conditions and their parameters, in placeholder order
pub(crate) struct FilterResult {
    /// Conditions prefixed with `AND` (empty when nothing is filtered)
    pub conditions: String,
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> ExpenseFilter<'query> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search text (matches description or category)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    /// Restrict to one category
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub(crate) fn build(&self) -> FilterResult {
        let mut conditions = String::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(q) = self.search.map(str::trim).filter(|q| !q.is_empty()) {
            let n = params.len() + 2;
            conditions.push_str(&format!(
                " AND (e.description LIKE ?{n} ESCAPE '\\' OR e.category LIKE ?{n} ESCAPE '\\')"
            ));
            params.push(Box::new(format!("%{}%", escape_like(q))));
        }

        if let Some(category) = self.category {
            let n = params.len() + 2;
            conditions.push_str(&format!(" AND e.category = ?{n} COLLATE NOCASE"));
            params.push(Box::new(category.as_str().to_string()));
        }

        FilterResult { conditions, params }
    }
}

/// Make `%` and `_` in user input match literally
fn escape_like(q: &str) -> String {
    let mut out = String::with_capacity(q.len());
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

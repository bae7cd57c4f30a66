//! Cost attribution for shared expenses
//!
//! A user's share of an expense is:
//! - the full amount when the expense has no participants,
//! - `amount / participant count` when the user is a participant,
//! - zero otherwise.
//!
//! The owner gets no special treatment: when participants exist the owner's
//! share is an equal split like everyone else's.

use crate::models::{Expense, UserId};

/// Portion of `expense.amount` attributed to `user`. No rounding is applied.
pub fn share(expense: &Expense, user: UserId) -> f64 {
    let participants = &expense.participants;

    // Checked first so the division below never sees zero
    if participants.is_empty() {
        return expense.amount;
    }

    if participants.contains(&user) {
        expense.amount / participants.len() as f64
    } else {
        0.0
    }
}

/// Whether `user` may see `expense` (owner or participant)
pub fn is_visible_to(expense: &Expense, user: UserId) -> bool {
    expense.owner_id == user || expense.participants.contains(&user)
}

/// Each participant's share of `expense`, in participant order.
///
/// Empty when the expense has no participants.
pub fn split_among(expense: &Expense) -> Vec<(UserId, f64)> {
    expense
        .participants
        .iter()
        .map(|&id| (id, share(expense, id)))
        .collect()
}

/// Pair every expense with `user`'s share of it
pub fn with_shares(expenses: &[Expense], user: UserId) -> Vec<(&Expense, f64)> {
    expenses.iter().map(|e| (e, share(e, user))).collect()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single dated monetary entry attributed to exactly one budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            date: Utc::now(),
        }
    }
}

/// Identifier and stored entry returned by a successful expense creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedExpense {
    pub id: String,
    pub expense: Expense,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named spending category with a limit and a running total of its own
/// expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub title: String,
    pub limit: f64,
    pub spent: f64,
    pub percent: f64,
    pub created_at: DateTime<Utc>,
    /// Owned expense identifiers in creation order.
    #[serde(default)]
    pub expenses: Vec<String>,
}

impl Budget {
    pub fn new(title: impl Into<String>, limit: f64) -> Self {
        Self {
            title: title.into(),
            limit,
            spent: 0.0,
            percent: 0.0,
            created_at: Utc::now(),
            expenses: Vec::new(),
        }
    }
}

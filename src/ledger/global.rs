use serde::{Deserialize, Serialize};

/// Aggregate totals across every budget in the ledger. One instance per
/// store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalTotals {
    /// Sum of all expense amounts across budgets.
    #[serde(default)]
    pub spent: f64,
    /// User-set overall cap.
    #[serde(default)]
    pub limit: f64,
    /// `spent` against `limit`, rounded up.
    #[serde(default)]
    pub percent: f64,
    /// Sum of all budgets' individual limits.
    #[serde(default)]
    pub current_limit: f64,
    /// `current_limit` against `limit`, rounded up.
    #[serde(default)]
    pub current_limit_percent: f64,
}

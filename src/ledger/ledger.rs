//! The budget state container and its mutation operations.

use std::collections::{HashMap, HashSet};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    ledger::{id, Budget, CreatedExpense, Expense, GlobalTotals},
    storage::{StateStore, BUDGETS_KEY, EXPENSES_KEY, GLOBAL_KEY},
};

/// Spent-to-limit ratio as an integer percentage, rounded up. A zero limit
/// yields 0 so stored values stay finite across JSON round-trips.
pub fn percent(spent: f64, limit: f64) -> f64 {
    if limit == 0.0 {
        return 0.0;
    }
    (spent / limit * 100.0).ceil()
}

/// Owns the three persisted collections and routes every mutation through
/// a recompute-then-persist cycle. Callers read state through shared
/// references and write only through the operations below.
///
/// Persistence failures never surface to callers: operations report their
/// outcome through return values and log storage problems instead.
pub struct BudgetLedger {
    global: GlobalTotals,
    budgets: HashMap<String, Budget>,
    expenses: HashMap<String, Expense>,
    ready: bool,
    store: Box<dyn StateStore>,
}

impl BudgetLedger {
    /// Creates an empty, not-yet-ready ledger over `store`.
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self {
            global: GlobalTotals::default(),
            budgets: HashMap::new(),
            expenses: HashMap::new(),
            ready: false,
            store,
        }
    }

    /// Loads the three collections from the store, substituting a zero-value
    /// default for any missing or corrupt entry, writes the result straight
    /// back, and marks the ledger ready. Call once before creating budgets
    /// or expenses.
    pub fn initialize(&mut self) {
        self.global = self.load_or_default(GLOBAL_KEY);
        self.budgets = self.load_or_default(BUDGETS_KEY);
        self.expenses = self.load_or_default(EXPENSES_KEY);
        self.persist_all();
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn global(&self) -> &GlobalTotals {
        &self.global
    }

    pub fn budgets(&self) -> &HashMap<String, Budget> {
        &self.budgets
    }

    pub fn expenses(&self) -> &HashMap<String, Expense> {
        &self.expenses
    }

    pub fn budget(&self, budget_id: &str) -> Option<&Budget> {
        self.budgets.get(budget_id)
    }

    pub fn expense(&self, expense_id: &str) -> Option<&Expense> {
        self.expenses.get(expense_id)
    }

    /// Inserts a fresh budget and returns its identifier, or `None` while
    /// the ledger has not been initialized.
    pub fn create_budget(&mut self, title: impl Into<String>, limit: f64) -> Option<String> {
        if !self.ready {
            return None;
        }
        let budget_id = id::fresh_id(&self.budgets);
        self.budgets.insert(budget_id.clone(), Budget::new(title, limit));
        self.global.current_limit += limit;
        self.refresh_global_percent();
        self.persist_all();
        Some(budget_id)
    }

    /// Records an expense against `budget_id`. Returns `None` while not
    /// ready, when the budget is absent, when `name` is empty, or when
    /// `amount` is zero or NaN.
    pub fn create_expense(
        &mut self,
        budget_id: &str,
        name: &str,
        amount: f64,
    ) -> Option<CreatedExpense> {
        if !self.ready {
            return None;
        }
        if name.is_empty() || amount == 0.0 || amount.is_nan() {
            return None;
        }
        if !self.budgets.contains_key(budget_id) {
            return None;
        }

        let expense_id = id::fresh_id(&self.expenses);
        let expense = Expense::new(name, amount);
        self.expenses.insert(expense_id.clone(), expense.clone());
        if let Some(budget) = self.budgets.get_mut(budget_id) {
            budget.expenses.push(expense_id.clone());
            budget.spent += amount;
            budget.percent = percent(budget.spent, budget.limit);
        }
        self.global.spent += amount;
        self.refresh_global_percent();
        self.persist_all();
        Some(CreatedExpense {
            id: expense_id,
            expense,
        })
    }

    /// Deletes one expense. Returns false unless the budget exists, the
    /// expense exists, and the budget's list actually owns it.
    pub fn remove_expense(&mut self, budget_id: &str, expense_id: &str) -> bool {
        let amount = match self.expenses.get(expense_id) {
            Some(expense) => expense.amount,
            None => return false,
        };
        let owned = self
            .budgets
            .get(budget_id)
            .map(|budget| budget.expenses.iter().any(|id| id == expense_id))
            .unwrap_or(false);
        if !owned {
            return false;
        }

        self.global.spent -= amount;
        if let Some(budget) = self.budgets.get_mut(budget_id) {
            budget.spent -= amount;
            budget.percent = percent(budget.spent, budget.limit);
            budget.expenses.retain(|id| id != expense_id);
        }
        self.expenses.remove(expense_id);
        self.refresh_global_percent();
        self.persist_all();
        true
    }

    /// Deletes a budget and every expense it owns. Returns false if the
    /// budget does not exist.
    pub fn remove_budget(&mut self, budget_id: &str) -> bool {
        let budget = match self.budgets.remove(budget_id) {
            Some(budget) => budget,
            None => return false,
        };
        for expense_id in &budget.expenses {
            self.expenses.remove(expense_id);
        }
        self.global.spent -= budget.spent;
        self.global.current_limit -= budget.limit;
        self.refresh_global_percent();
        self.persist_all();
        true
    }

    /// Moves a budget to a new limit, applying the delta to the aggregate
    /// limit sum. No-op if the budget is absent.
    pub fn change_limit(&mut self, budget_id: &str, new_limit: f64) {
        let budget = match self.budgets.get_mut(budget_id) {
            Some(budget) => budget,
            None => return,
        };
        self.global.current_limit += new_limit - budget.limit;
        budget.limit = new_limit;
        budget.percent = percent(budget.spent, budget.limit);
        self.refresh_global_percent();
        self.persist_all();
    }

    /// Sets the overall cap. No-op when `new_limit` is zero or not finite.
    pub fn update_limit(&mut self, new_limit: f64) {
        if new_limit == 0.0 || !new_limit.is_finite() {
            return;
        }
        self.global.limit = new_limit;
        self.refresh_global_percent();
        self.persist_all();
    }

    /// Clears every expense in the ledger and zeroes all spent totals. The
    /// overall cap and the per-budget limits stay untouched, as does the
    /// aggregate limit percentage. Idempotent.
    pub fn reset_expenses(&mut self) {
        for budget in self.budgets.values_mut() {
            budget.expenses.clear();
            budget.spent = 0.0;
            budget.percent = 0.0;
        }
        self.expenses.clear();
        self.global.spent = 0.0;
        self.global.percent = 0.0;
        self.persist_all();
    }

    /// Clears the expenses of a single budget, keeping its limit. No-op if
    /// the budget is absent.
    pub fn reset_budget_expenses(&mut self, budget_id: &str) {
        let budget = match self.budgets.get_mut(budget_id) {
            Some(budget) => budget,
            None => return,
        };
        for expense_id in budget.expenses.drain(..) {
            self.expenses.remove(&expense_id);
        }
        self.global.spent -= budget.spent;
        budget.spent = 0.0;
        budget.percent = percent(budget.spent, budget.limit);
        self.refresh_global_percent();
        self.persist_all();
    }

    /// Detects dangling references between the budgets and expenses
    /// collections without mutating state.
    pub fn integrity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (budget_id, budget) in &self.budgets {
            for expense_id in &budget.expenses {
                if !self.expenses.contains_key(expense_id) {
                    warnings.push(format!(
                        "budget {} references unknown expense {}",
                        budget_id, expense_id
                    ));
                }
            }
        }
        let referenced: HashSet<&String> = self
            .budgets
            .values()
            .flat_map(|budget| budget.expenses.iter())
            .collect();
        for expense_id in self.expenses.keys() {
            if !referenced.contains(expense_id) {
                warnings.push(format!("expense {} is not owned by any budget", expense_id));
            }
        }
        warnings
    }

    fn refresh_global_percent(&mut self) {
        self.global.percent = percent(self.global.spent, self.global.limit);
        self.global.current_limit_percent = percent(self.global.current_limit, self.global.limit);
    }

    fn persist_all(&self) {
        self.persist(GLOBAL_KEY, &self.global);
        self.persist(BUDGETS_KEY, &self.budgets);
        self.persist(EXPENSES_KEY, &self.expenses);
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string_pretty(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("failed to encode `{key}`: {err}");
                return;
            }
        };
        if let Err(err) = self.store.save(key, &raw) {
            tracing::warn!("failed to persist `{key}`: {err}");
        }
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.load(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!("corrupt state under `{key}`, using defaults: {err}");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!("unreadable state under `{key}`, using defaults: {err}");
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_rounds_up() {
        assert_eq!(percent(10.0, 500.0), 2.0);
        assert_eq!(percent(1.0, 300.0), 1.0);
        assert_eq!(percent(150.0, 100.0), 150.0);
    }

    #[test]
    fn percent_of_zero_limit_is_zero() {
        assert_eq!(percent(0.0, 0.0), 0.0);
        assert_eq!(percent(25.0, 0.0), 0.0);
    }
}

//! String-keyed persistence backends for ledger state.

pub mod json_store;
pub mod memory;

use crate::errors::LedgerError;

/// Storage key holding the aggregate totals.
pub const GLOBAL_KEY: &str = "global";
/// Storage key holding the budgets collection.
pub const BUDGETS_KEY: &str = "budgets";
/// Storage key holding the expenses collection.
pub const EXPENSES_KEY: &str = "expenses";

/// Abstraction over string-keyed persistence backends.
pub trait StateStore: Send + Sync {
    /// Returns the raw text previously stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Overwrites the stored value for `key`.
    fn save(&self, key: &str, raw: &str) -> Result<(), LedgerError>;
}

impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, LedgerError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), LedgerError> {
        (**self).save(key, raw)
    }
}

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;

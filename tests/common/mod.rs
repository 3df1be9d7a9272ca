use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use spendbook::{ledger::BudgetLedger, storage::JsonFileStore};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an initialized ledger backed by a unique directory for each test.
pub fn setup_file_ledger() -> (BudgetLedger, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = JsonFileStore::new(Some(base.clone())).expect("create json store");
    let mut ledger = BudgetLedger::new(Box::new(store));
    ledger.initialize();
    (ledger, base)
}

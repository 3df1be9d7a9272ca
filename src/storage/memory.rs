use std::{
    collections::HashMap,
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use crate::errors::LedgerError;

use super::StateStore;

/// In-process store for tests and embedders that have no filesystem.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads a raw value, as if a previous session had stored it.
    pub fn seed(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.entries
            .lock()
            .expect("lock memory store")
            .insert(key.into(), raw.into());
    }

    /// Makes every subsequent save fail, to exercise persistence-failure
    /// handling in callers.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Returns a copy of the stored entries.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().expect("lock memory store").clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self
            .entries
            .lock()
            .expect("lock memory store")
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), LedgerError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Io(io::Error::new(
                io::ErrorKind::Other,
                "memory store is rejecting writes",
            )));
        }
        self.entries
            .lock()
            .expect("lock memory store")
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }
}

//! # In-Memory Storage
//!
//! HashMap-backed storage port for tests and ephemeral sessions. Failure
//! toggles let tests exercise the degraded persistence paths without a
//! broken database on disk.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::StoragePort;

/// Volatile storage port; contents are lost when the value is dropped.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail (simulates unavailable storage)
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set` fail (simulates a full/blocked store)
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("storage unavailable (simulated read failure)");
        }
        let entries = self
            .entries
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("storage unavailable (simulated write failure)");
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));

        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v2".to_string()));
    }

    #[test]
    fn test_failure_toggles() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();

        storage.fail_reads(true);
        assert!(storage.get("k").is_err());
        storage.fail_reads(false);
        assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));

        storage.fail_writes(true);
        assert!(storage.set("k", "v2").is_err());
        storage.fail_writes(false);

        // The failed write must not have landed
        assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));
    }
}

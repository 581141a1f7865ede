//! # Stock Ledger
//!
//! Persisted mapping from product id to remaining purchasable units — the
//! single source of truth for availability across page loads. Entries are
//! seeded lazily from each product's declared inventory and never
//! overwritten by later catalog loads.

use std::collections::HashMap;

use crate::storage::{StoragePort, STOCK_KEY};

use super::product::Product;

/// Id -> remaining stock map, persisted under [`STOCK_KEY`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StockLedger {
    entries: HashMap<String, u32>,
}

impl StockLedger {
    /// Load the persisted ledger. Read or parse failures degrade to an
    /// empty ledger (entries re-seed on this load).
    pub fn load(storage: &dyn StoragePort) -> Self {
        let raw = match storage.get(STOCK_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read stock ledger: {:#}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, u32>>(&raw) {
            Ok(entries) => Self { entries },
            Err(e) => {
                tracing::warn!("Stock ledger is corrupt, starting empty: {}", e);
                Self::default()
            }
        }
    }

    /// Persist the ledger. Write failures are logged and swallowed; the
    /// in-memory ledger stays authoritative for this session.
    pub fn save(&self, storage: &dyn StoragePort) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize stock ledger: {}", e);
                return;
            }
        };
        if let Err(e) = storage.set(STOCK_KEY, &raw) {
            tracing::warn!("Failed to persist stock ledger: {:#}", e);
        }
    }

    /// Seed-once: insert the declared inventory (0 when absent) for every
    /// product id not already in the ledger. Existing entries are never
    /// touched. Returns the number of newly seeded ids.
    pub fn seed(&mut self, products: &[Product]) -> usize {
        let mut seeded = 0;
        for product in products {
            if !self.entries.contains_key(&product.id) {
                self.entries
                    .insert(product.id.clone(), product.inventory.unwrap_or(0));
                seeded += 1;
            }
        }
        seeded
    }

    /// Remaining stock for `id`; ids the ledger has never seen are 0
    pub fn stock_for(&self, id: &str) -> u32 {
        self.entries.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize::normalize_product;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn product(id: &str, inventory: Option<u32>) -> Product {
        let mut value = json!({"id": id, "title": id});
        if let Some(n) = inventory {
            value["inventory"] = json!(n);
        }
        normalize_product(value, 0)
    }

    #[test]
    fn test_seed_inserts_missing_ids_only() {
        let mut ledger = StockLedger::default();
        let first = vec![product("a", Some(5)), product("b", None)];

        assert_eq!(ledger.seed(&first), 2);
        assert_eq!(ledger.stock_for("a"), 5);
        assert_eq!(ledger.stock_for("b"), 0, "absent inventory seeds 0");

        // A later load with different inventory must not reseed
        let second = vec![product("a", Some(99)), product("c", Some(1))];
        assert_eq!(ledger.seed(&second), 1);
        assert_eq!(ledger.stock_for("a"), 5);
        assert_eq!(ledger.stock_for("c"), 1);
    }

    #[test]
    fn test_unknown_id_reads_zero() {
        let ledger = StockLedger::default();
        assert_eq!(ledger.stock_for("never-seen"), 0);
    }

    #[test]
    fn test_save_load_round_trip() {
        let storage = MemoryStorage::new();
        let mut ledger = StockLedger::default();
        ledger.seed(&[product("a", Some(3)), product("b", Some(0))]);
        ledger.save(&storage);

        let reloaded = StockLedger::load(&storage);
        assert_eq!(reloaded, ledger);
        assert_eq!(reloaded.stock_for("a"), 3);
        assert_eq!(reloaded.stock_for("b"), 0);
    }

    #[test]
    fn test_read_failure_degrades_to_empty() {
        let storage = MemoryStorage::new();
        storage.set(STOCK_KEY, "{\"a\": 2}").unwrap();
        storage.fail_reads(true);

        let ledger = StockLedger::load(&storage);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_corrupt_payload_degrades_to_empty() {
        let storage = MemoryStorage::new();
        storage.set(STOCK_KEY, "not json at all").unwrap();

        let ledger = StockLedger::load(&storage);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let storage = MemoryStorage::new();
        storage.fail_writes(true);

        let mut ledger = StockLedger::default();
        ledger.seed(&[product("a", Some(3))]);
        ledger.save(&storage); // must not panic

        // In-memory state stays authoritative
        assert_eq!(ledger.stock_for("a"), 3);
    }
}

//! # Storage Port
//!
//! Key-value persistence boundary shared by the catalog loader and the cart
//! store. The static site kept everything in browser localStorage; here the
//! same contract is a trait so the SQLite backend and the in-memory test
//! fake are interchangeable.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use anyhow::Result;

/// Storage key for the persisted cart line items
pub const CART_KEY: &str = "mirlos-cart";

/// Storage key for the persisted stock ledger
pub const STOCK_KEY: &str = "mirlos-stock";

/// Minimal key-value persistence contract.
///
/// Implementations must tolerate concurrent readers behind `Arc`; all
/// methods take `&self`.
pub trait StoragePort: Send + Sync {
    /// Read the value stored under `key`, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

//! # Storefront Core
//!
//! Business logic and state management for the Mirlos Treasures storefront -
//! catalog loading, stock reconciliation, and the cart state machine. DOM
//! rendering lives elsewhere; this crate is the part behind the UI.
//!
//! ## Architecture
//!
//! - `catalog/` - fetch, normalize, and publish products; seed the stock ledger
//! - `cart/` - ordered line items, stock-aware mutations, totals
//! - `storage/` - key-value storage port (SQLite backend, in-memory fake)
//! - `storefront` - application root owning all of the above
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::catalog::HttpCatalogSource;
//! use storefront_core::storage::SqliteStorage;
//! use storefront_core::Storefront;
//!
//! let storage = Arc::new(SqliteStorage::open()?);
//! let mut store = Storefront::new(storage);
//! store.load_catalog(&HttpCatalogSource::new("https://shop.example/products.json")).await?;
//! store.add_to_cart("brass-lamp", 1)?;
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod storage;
pub mod storefront;

pub use cart::{AddOutcome, CartStore, CartTotals, LineItem};
pub use catalog::{Catalog, Product, StockLedger, StockLevel};
pub use error::{CartError, CatalogError};
pub use storage::StoragePort;
pub use storefront::Storefront;

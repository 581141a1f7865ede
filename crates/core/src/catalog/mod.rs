pub mod ledger;
pub mod loader;
pub mod normalize;
pub mod product;
pub mod source;

pub use ledger::StockLedger;
pub use loader::Catalog;
pub use normalize::{normalize_category, slugify, RawProduct};
pub use product::{Product, StockLevel, PLACEHOLDER_IMG};
pub use source::{CatalogSource, HttpCatalogSource, InlineCatalogSource};

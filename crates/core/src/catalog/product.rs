//! # Product Model
//!
//! The canonical product record published by the catalog loader. Everything
//! except `current_stock` is fixed at load time; `current_stock` comes from
//! the persisted stock ledger and is what the cart checks additions against.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image used when a record carries no viable image field
pub const PLACEHOLDER_IMG: &str = "images/placeholder.png";

/// A normalized catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique id, stable across reloads (explicit, slugified, or positional)
    pub id: String,
    pub title: String,
    /// Non-negative; 0 when the source value was missing or non-numeric
    pub price: f64,
    /// Canonicalized category (lower-cased, synonyms folded)
    pub category: String,
    /// First viable image, placeholder fallback
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub condition: String,
    /// Declared inventory seed; `None` when absent or non-finite
    #[serde(default)]
    pub inventory: Option<u32>,
    /// Remaining purchasable units per the stock ledger
    #[serde(default)]
    pub current_stock: u32,
    /// Source fields we do not interpret, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Classify remaining stock for presentation purposes
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_units(self.current_stock)
    }
}

/// Presentation-agnostic availability bucket ("Sold out" / "Only N left" /
/// "In stock: N" in the storefront UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    SoldOut,
    Low(u32),
    InStock(u32),
}

impl StockLevel {
    pub fn from_units(units: u32) -> Self {
        match units {
            0 => Self::SoldOut,
            1..=2 => Self::Low(units),
            n => Self::InStock(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level_buckets() {
        assert_eq!(StockLevel::from_units(0), StockLevel::SoldOut);
        assert_eq!(StockLevel::from_units(1), StockLevel::Low(1));
        assert_eq!(StockLevel::from_units(2), StockLevel::Low(2));
        assert_eq!(StockLevel::from_units(3), StockLevel::InStock(3));
        assert_eq!(StockLevel::from_units(40), StockLevel::InStock(40));
    }
}

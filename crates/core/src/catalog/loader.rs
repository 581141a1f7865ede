//! # Catalog Loader
//!
//! Fetches, normalizes, and publishes the product catalog for a page load.
//! Loading also reconciles the persisted stock ledger: ids the ledger has
//! never seen are seeded from each product's declared inventory, then every
//! product gets its `current_stock` from the now-complete ledger.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CatalogError;
use crate::storage::StoragePort;

use super::ledger::StockLedger;
use super::normalize::{normalize_category, normalize_product};
use super::product::Product;
use super::source::CatalogSource;

/// The published id -> product map for the current page load.
///
/// Starts empty; cart mutations against an empty catalog fail with
/// `UnknownProduct`, which is exactly the degraded behavior a failed load
/// should produce.
#[derive(Debug, Default)]
pub struct Catalog {
    by_id: HashMap<String, Product>,
    order: Vec<String>,
}

impl Catalog {
    /// Fetch and publish the catalog.
    ///
    /// Duplicate ids collapse last-wins: the map keeps the last-seen record
    /// at the first occurrence's position. A payload that is not a JSON
    /// array publishes nothing and returns `MalformedPayload`.
    pub async fn load(
        source: &dyn CatalogSource,
        storage: &dyn StoragePort,
    ) -> Result<Self, CatalogError> {
        let payload = source.fetch().await.map_err(CatalogError::Fetch)?;

        let records = match payload {
            Value::Array(records) => records,
            other => {
                return Err(CatalogError::MalformedPayload {
                    found: json_type_name(&other).to_string(),
                })
            }
        };

        let mut products: Vec<Product> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| normalize_product(record, index))
            .collect();

        let mut ledger = StockLedger::load(storage);
        let seeded = ledger.seed(&products);
        if seeded > 0 {
            tracing::debug!("Seeded {} new stock ledger entries", seeded);
        }
        ledger.save(storage);

        for product in &mut products {
            product.current_stock = ledger.stock_for(&product.id);
        }

        let mut by_id = HashMap::with_capacity(products.len());
        let mut order = Vec::with_capacity(products.len());
        for product in products {
            let id = product.id.clone();
            if by_id.insert(id.clone(), product).is_none() {
                order.push(id);
            } else {
                tracing::warn!("Duplicate product id '{}', keeping the last record", id);
            }
        }

        tracing::info!("Catalog loaded with {} products", order.len());
        Ok(Self { by_id, order })
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id)
    }

    /// Products in source order
    pub fn products(&self) -> Vec<&Product> {
        self.order.iter().filter_map(|id| self.by_id.get(id)).collect()
    }

    /// Products whose canonical category matches `category` (either side may
    /// use a synonym spelling)
    pub fn filter_by_category(&self, category: &str) -> Vec<&Product> {
        let wanted = normalize_category(category);
        self.products()
            .into_iter()
            .filter(|p| p.category == wanted)
            .collect()
    }

    /// Products flagged as featured, in source order
    pub fn featured(&self) -> Vec<&Product> {
        self.products().into_iter().filter(|p| p.featured).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

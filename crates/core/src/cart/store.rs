//! # Cart Store
//!
//! Ordered cart line items with stock-aware mutations. Every mutation
//! consults the published catalog for the stock ceiling, then commits:
//! persist the lines, recompute subtotal and item count. Storage trouble is
//! never fatal — a cart that cannot be read starts empty, a cart that
//! cannot be written stays authoritative in memory for the session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CartError;
use crate::storage::{StoragePort, CART_KEY};

/// One cart entry: a product snapshot plus the requested quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub qty: u32,
}

/// Last-committed cart aggregates, for the surrounding UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CartTotals {
    /// Sum of price x qty over all lines
    pub subtotal: f64,
    /// Sum of qty over all lines (the badge count)
    pub item_count: u64,
}

/// Result of a successful `add`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The requested quantity was applied in full
    Added,
    /// The quantity was clamped to the remaining stock. The mutation still
    /// committed; this is a soft notice, not an error.
    StockCeiling,
}

/// The cart state machine
pub struct CartStore {
    storage: Arc<dyn StoragePort>,
    lines: Vec<LineItem>,
    totals: CartTotals,
}

impl CartStore {
    /// Open the cart, restoring persisted lines. A missing, unreadable, or
    /// corrupt value starts an empty cart.
    pub fn open(storage: Arc<dyn StoragePort>) -> Self {
        let lines = match storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!("Persisted cart is corrupt, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read persisted cart, starting empty: {:#}", e);
                Vec::new()
            }
        };

        let mut store = Self {
            storage,
            lines,
            totals: CartTotals::default(),
        };
        store.totals = store.compute_totals();
        store
    }

    /// Add `qty` units of `id` to the cart (at least one unit is requested).
    ///
    /// Fails with `UnknownProduct` when the id is not in the catalog and
    /// `OutOfStock` when nothing remains; neither failure mutates the cart.
    /// Otherwise the line quantity rises to at most the remaining stock and
    /// the cart commits.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        id: &str,
        qty: u32,
    ) -> Result<AddOutcome, CartError> {
        let product = match catalog.get(id) {
            Some(product) => product,
            None => {
                tracing::warn!("Ignoring add for unknown product id '{}'", id);
                return Err(CartError::UnknownProduct { id: id.to_string() });
            }
        };

        let max = product.current_stock;
        if max == 0 {
            return Err(CartError::OutOfStock { id: id.to_string() });
        }

        let requested = qty.max(1);
        let ceiling_hit;

        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                let desired = line.qty.saturating_add(requested);
                ceiling_hit = desired > max;
                line.qty = desired.min(max);
            }
            None => {
                ceiling_hit = requested > max;
                self.lines.push(LineItem {
                    id: product.id.clone(),
                    title: product.title.clone(),
                    price: product.price,
                    image: product.image.clone(),
                    qty: requested.min(max),
                });
            }
        }

        self.commit();
        Ok(if ceiling_hit {
            AddOutcome::StockCeiling
        } else {
            AddOutcome::Added
        })
    }

    /// Remove the line for `id`. Removing an absent id is a silent no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        if self.lines.len() != before {
            self.commit();
        }
    }

    /// Set the quantity for an existing line. The value is clamped to at
    /// least 1, then to the product's remaining stock when the product is
    /// still in the catalog. Absent lines are a no-op.
    pub fn set_qty(&mut self, catalog: &Catalog, id: &str, qty: i64) {
        let stock = catalog.get(id).map(|p| p.current_stock);
        let Some(line) = self.lines.iter_mut().find(|line| line.id == id) else {
            return;
        };

        let mut next = qty.clamp(1, u32::MAX as i64) as u32;
        if let Some(stock) = stock {
            if stock > 0 {
                next = next.min(stock);
            }
        }

        line.qty = next;
        self.commit();
    }

    /// Replace the whole cart (the original site's `setCart` hook)
    pub fn replace(&mut self, items: Vec<LineItem>) {
        self.lines = items;
        self.commit();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Persist and republish aggregates. Runs after every mutation.
    fn commit(&mut self) {
        match serde_json::to_string(&self.lines) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(CART_KEY, &raw) {
                    tracing::warn!("Failed to persist cart: {:#}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize cart: {}", e),
        }
        self.totals = self.compute_totals();
    }

    fn compute_totals(&self) -> CartTotals {
        CartTotals {
            subtotal: self
                .lines
                .iter()
                .map(|line| line.price * f64::from(line.qty))
                .sum(),
            item_count: self.lines.iter().map(|line| u64::from(line.qty)).sum(),
        }
    }
}

/// `$X.XX` display formatting; non-finite values render as `$0.00`
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }
    format!("${:.2}", value)
}

//! # Storefront Context
//!
//! The application root: owns the storage port, the published catalog, and
//! the cart, and wires them together. The original scripts coordinated
//! through `window` globals; here the UI layer holds one `Storefront` and
//! calls into it.

use std::sync::Arc;

use crate::cart::{AddOutcome, CartStore, CartTotals, LineItem};
use crate::catalog::{Catalog, CatalogSource};
use crate::error::{CartError, CatalogError};
use crate::storage::StoragePort;

pub struct Storefront {
    storage: Arc<dyn StoragePort>,
    catalog: Catalog,
    cart: CartStore,
}

impl Storefront {
    /// Create the storefront over a storage port. The cart restores itself
    /// from storage immediately; the catalog stays empty until
    /// [`load_catalog`](Self::load_catalog) succeeds.
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        let cart = CartStore::open(Arc::clone(&storage));
        Self {
            storage,
            catalog: Catalog::default(),
            cart,
        }
    }

    /// Fetch and publish the catalog. On failure the previous catalog (empty
    /// on first load) stays in place and cart additions keep failing with
    /// `UnknownProduct`.
    pub async fn load_catalog(
        &mut self,
        source: &dyn CatalogSource,
    ) -> Result<(), CatalogError> {
        match Catalog::load(source, self.storage.as_ref()).await {
            Ok(catalog) => {
                self.catalog = catalog;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load catalog: {}", e);
                Err(e)
            }
        }
    }

    pub fn add_to_cart(&mut self, id: &str, qty: u32) -> Result<AddOutcome, CartError> {
        self.cart.add(&self.catalog, id, qty)
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        self.cart.remove(id);
    }

    pub fn set_qty(&mut self, id: &str, qty: i64) {
        self.cart.set_qty(&self.catalog, id, qty);
    }

    pub fn cart(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InlineCatalogSource;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    #[tokio::test]
    async fn test_end_to_end_session() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = Storefront::new(storage);

        let source = InlineCatalogSource::from_records(vec![
            json!({"id": "lamp", "title": "Brass Lamp", "price": 30, "inventory": 1}),
            json!({"id": "vase", "title": "Vase", "price": 12.5, "inventory": 4}),
        ]);
        store.load_catalog(&source).await.unwrap();
        assert_eq!(store.catalog().len(), 2);

        assert_eq!(store.add_to_cart("vase", 2).unwrap(), AddOutcome::Added);
        assert_eq!(
            store.add_to_cart("lamp", 3).unwrap(),
            AddOutcome::StockCeiling
        );
        assert_eq!(store.totals().subtotal, 55.0);
        assert_eq!(store.totals().item_count, 3);

        store.set_qty("vase", 1);
        assert_eq!(store.totals().subtotal, 42.5);

        store.remove_from_cart("lamp");
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].id, "vase");
    }

    #[tokio::test]
    async fn test_add_before_catalog_load_fails_unknown() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = Storefront::new(storage);

        let err = store.add_to_cart("lamp", 1).unwrap_err();
        assert!(matches!(err, CartError::UnknownProduct { .. }));
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_catalog_unpublished() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = Storefront::new(storage);

        let bad = InlineCatalogSource::new(json!(42));
        assert!(store.load_catalog(&bad).await.is_err());
        assert!(store.catalog().is_empty());
        assert!(matches!(
            store.add_to_cart("anything", 1),
            Err(CartError::UnknownProduct { .. })
        ));
    }

    #[tokio::test]
    async fn test_cart_survives_new_session() {
        let storage = Arc::new(MemoryStorage::new());
        let source = InlineCatalogSource::from_records(vec![
            json!({"id": "vase", "title": "Vase", "price": 12.5, "inventory": 4}),
        ]);

        {
            let mut store = Storefront::new(Arc::clone(&storage) as Arc<dyn StoragePort>);
            store.load_catalog(&source).await.unwrap();
            store.add_to_cart("vase", 2).unwrap();
        }

        // Next "page load": same storage, fresh storefront
        let mut store = Storefront::new(Arc::clone(&storage) as Arc<dyn StoragePort>);
        store.load_catalog(&source).await.unwrap();
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].qty, 2);
        assert_eq!(store.totals().subtotal, 25.0);
    }
}

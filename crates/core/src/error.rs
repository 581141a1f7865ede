//! # Error Taxonomy
//!
//! Typed domain errors returned from cart mutations and catalog loading.
//! Nothing here is fatal: persistence trouble degrades to an empty state and
//! a failed catalog load leaves the storefront usable with no products.

use thiserror::Error;

/// Errors returned from cart mutations.
///
/// A soft stock-ceiling clamp is *not* an error (the mutation still lands);
/// see [`crate::cart::AddOutcome`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The id is not in the published catalog. The cart is left unchanged.
    #[error("unknown product id: {id}")]
    UnknownProduct { id: String },

    /// The product has zero remaining stock. The cart is left unchanged.
    #[error("product is sold out: {id}")]
    OutOfStock { id: String },
}

/// Errors surfaced when the catalog cannot be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog source could not be read (network failure, bad status,
    /// undecodable body).
    #[error("failed to fetch catalog: {0:#}")]
    Fetch(anyhow::Error),

    /// The payload decoded but is not a JSON array of records.
    #[error("catalog payload is not an array (got {found})")]
    MalformedPayload { found: String },
}

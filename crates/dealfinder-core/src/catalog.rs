//! Catalog API port.
//!
//! The catalog is a remote collaborator treated as a black box; this trait
//! decouples the orchestration services from the HTTP client that reaches it.

use crate::error::Result;
use crate::product::Product;
use crate::session::AuthToken;
use async_trait::async_trait;

/// Remote catalog of products aggregated from multiple storefronts.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Searches the federated catalog by text query.
    ///
    /// # Returns
    ///
    /// Products in the catalog's own ranking order. The client never
    /// re-sorts these at ingestion; ordering is a derived-view concern.
    async fn search(&self, query: &str) -> Result<Vec<Product>>;

    /// Fetches a single product by id, with detail fields populated.
    ///
    /// # Returns
    ///
    /// - `Ok(product)`: Product found
    /// - `Err(DealfinderError::NotFound { .. })`: Unknown id
    async fn product(&self, id: &str) -> Result<Product>;

    /// Fetches products similar to the given id.
    async fn similar(&self, id: &str) -> Result<Vec<Product>>;

    /// Fetches recommended products for the authenticated principal.
    async fn recommended(&self, token: &AuthToken) -> Result<Vec<Product>>;
}

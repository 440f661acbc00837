//! Session-gated recommendation feed.

use crate::session_service::SessionService;
use dealfinder_core::catalog::CatalogApi;
use dealfinder_core::error::Result;
use dealfinder_core::product::Product;
use std::sync::{Arc, RwLock};

/// Ranked products fetched once per authenticated session activation.
/// Refreshes are idempotent reads; last response wins.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<dyn CatalogApi>,
    session: SessionService,
    products: Arc<RwLock<Vec<Product>>>,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn CatalogApi>, session: SessionService) -> Self {
        Self {
            catalog,
            session,
            products: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Re-fetches the feed. A no-op (not an error) without a session; the
    /// catalog's ranking is kept as returned.
    pub async fn refresh(&self) -> Result<()> {
        let Some(token) = self.session.token() else {
            return Ok(());
        };

        let fetched = self.catalog.recommended(&token).await?;
        *self.products.write().unwrap() = fetched;
        Ok(())
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.read().unwrap().clone()
    }

    /// Drops the local feed (session teardown).
    pub fn clear_local(&self) {
        self.products.write().unwrap().clear();
    }
}

//! Favorite-set tracking with optimistic toggles.
//!
//! Membership flips locally before the server confirms, and reverts if the
//! server rejects. Toggles on the same product id serialize through a
//! per-id lock so overlapping calls net out to the user's intent.

use crate::session_service::SessionService;
use dealfinder_core::error::{DealfinderError, Result};
use dealfinder_core::product::Product;
use dealfinder_core::user::UserApi;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex, RwLock};
use tokio::sync::Mutex;

/// Per-product favorite membership, scoped to the session.
#[derive(Clone)]
pub struct FavoritesService {
    user_api: Arc<dyn UserApi>,
    session: SessionService,
    members: Arc<RwLock<HashSet<String>>>,
    /// Full product objects from the last refresh, for the favorites page
    products: Arc<RwLock<Vec<Product>>>,
    /// One lock per product id; overlapping toggles on one id serialize
    toggle_locks: Arc<StdMutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl FavoritesService {
    pub fn new(user_api: Arc<dyn UserApi>, session: SessionService) -> Self {
        Self {
            user_api,
            session,
            members: Arc::new(RwLock::new(HashSet::new())),
            products: Arc::new(RwLock::new(Vec::new())),
            toggle_locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Flips membership for a product.
    ///
    /// The local bit flips immediately; the matching add/remove call is
    /// issued afterwards, and the bit reverts if the server rejects it.
    ///
    /// # Returns
    ///
    /// - `Ok(bool)`: New membership state after confirmation
    /// - `Err(DealfinderError::NotAuthenticated)`: No session; no network call
    /// - `Err(DealfinderError::ToggleFailed)`: Remote rejection; bit reverted
    pub async fn toggle(&self, product_id: &str) -> Result<bool> {
        let Some(token) = self.session.token() else {
            return Err(DealfinderError::NotAuthenticated);
        };

        let lock = self.toggle_lock(product_id);
        let _guard = lock.lock().await;

        // Optimistic flip; `was_member` is the pre-state held for revert
        let was_member = {
            let mut members = self.members.write().unwrap();
            if members.contains(product_id) {
                members.remove(product_id);
                true
            } else {
                members.insert(product_id.to_string());
                false
            }
        };

        let outcome = if was_member {
            self.user_api.remove_favorite(&token, product_id).await
        } else {
            self.user_api.add_favorite(&token, product_id).await
        };

        match outcome {
            Ok(()) => Ok(!was_member),
            Err(err) => {
                let mut members = self.members.write().unwrap();
                if was_member {
                    members.insert(product_id.to_string());
                } else {
                    members.remove(product_id);
                }
                tracing::warn!(product_id, error = %err, "favorite toggle rejected, reverted");
                Err(DealfinderError::ToggleFailed)
            }
        }
    }

    /// Replaces the membership set and product mirror from the server.
    /// Silently does nothing without a session.
    pub async fn refresh(&self) -> Result<()> {
        let Some(token) = self.session.token() else {
            return Ok(());
        };

        let fetched = self.user_api.list_favorites(&token).await?;

        let ids: HashSet<String> = fetched.iter().map(|p| p.id.clone()).collect();
        *self.members.write().unwrap() = ids;
        *self.products.write().unwrap() = fetched;
        Ok(())
    }

    /// Live membership check; display surfaces read this instead of caching
    /// a flag at mount time.
    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.members.read().unwrap().contains(product_id)
    }

    /// Current membership ids.
    pub fn snapshot(&self) -> HashSet<String> {
        self.members.read().unwrap().clone()
    }

    /// Full product objects from the last refresh.
    pub fn products(&self) -> Vec<Product> {
        self.products.read().unwrap().clone()
    }

    /// Drops all local favorites state (session teardown).
    pub fn clear_local(&self) {
        self.members.write().unwrap().clear();
        self.products.write().unwrap().clear();
    }

    fn toggle_lock(&self, product_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.toggle_locks.lock().unwrap();
        locks.entry(product_id.to_string()).or_default().clone()
    }
}

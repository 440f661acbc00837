//! Search history feed.
//!
//! Mirrors the server-owned history list, most recent first. Deletions are
//! confirmed remotely before any local mutation; accidental data loss here
//! is more visible to the user than a favorites glitch, so nothing in this
//! feed is optimistic.

use crate::session_service::SessionService;
use dealfinder_core::error::{DealfinderError, Result};
use dealfinder_core::history::HistoryEntry;
use dealfinder_core::user::UserApi;
use std::sync::{Arc, RwLock};

/// Ordered list of past queries tied to the session.
#[derive(Clone)]
pub struct HistoryService {
    user_api: Arc<dyn UserApi>,
    session: SessionService,
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl HistoryService {
    pub fn new(user_api: Arc<dyn UserApi>, session: SessionService) -> Self {
        Self {
            user_api,
            session,
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Records a query remotely. The confirmed list arrives via `refresh`;
    /// dedupe and ordering are server-side concerns.
    ///
    /// # Returns
    ///
    /// - `Err(DealfinderError::NotAuthenticated)`: No session; no network call
    pub async fn append(&self, query: &str) -> Result<()> {
        let Some(token) = self.session.token() else {
            return Err(DealfinderError::NotAuthenticated);
        };

        self.user_api.append_history(&token, query).await
    }

    /// Re-fetches the feed in one request, replacing the local mirror.
    /// Silently does nothing without a session.
    pub async fn refresh(&self) -> Result<()> {
        let Some(token) = self.session.token() else {
            return Ok(());
        };

        let fetched = self.user_api.list_history(&token).await?;
        *self.entries.write().unwrap() = fetched;
        Ok(())
    }

    /// Removes one entry remotely, then locally only on confirmed success.
    ///
    /// # Returns
    ///
    /// - `Err(DealfinderError::HistoryMutationFailed)`: Remote rejection;
    ///   local state unchanged
    pub async fn remove_one(&self, entry_id: i64) -> Result<()> {
        let Some(token) = self.session.token() else {
            return Err(DealfinderError::NotAuthenticated);
        };

        self.user_api
            .remove_history(&token, entry_id)
            .await
            .map_err(|err| {
                tracing::warn!(entry_id, error = %err, "history delete rejected");
                DealfinderError::HistoryMutationFailed
            })?;

        self.entries
            .write()
            .unwrap()
            .retain(|entry| entry.id != entry_id);
        Ok(())
    }

    /// Clears every entry remotely, then replaces the local list with empty
    /// only after confirmation.
    pub async fn clear_all(&self) -> Result<()> {
        let Some(token) = self.session.token() else {
            return Err(DealfinderError::NotAuthenticated);
        };

        self.user_api.clear_history(&token).await.map_err(|err| {
            tracing::warn!(error = %err, "history clear rejected");
            DealfinderError::HistoryMutationFailed
        })?;

        self.entries.write().unwrap().clear();
        Ok(())
    }

    /// The mirrored feed, most recent first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Drops the local mirror (session teardown).
    pub fn clear_local(&self) {
        self.entries.write().unwrap().clear();
    }
}

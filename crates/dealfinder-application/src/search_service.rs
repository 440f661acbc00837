//! The search engine: query lifecycle and the single result slot.
//!
//! Exactly one search request is current at a time. A new `search` call
//! supersedes the previous one without cancelling its network call; a
//! generation counter makes sure a slow response for a superseded request
//! is discarded instead of overwriting newer state.

use crate::history_service::HistoryService;
use crate::session_service::SessionService;
use dealfinder_core::catalog::CatalogApi;
use dealfinder_core::search::SearchSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// One generic message for every search failure; `NetworkFailure` and
/// `ServerError` are deliberately indistinguishable to the user here.
const GENERIC_SEARCH_ERROR: &str = "An error occurred while searching. Please try again.";

/// Owns query text, request lifecycle, and the raw result list.
#[derive(Clone)]
pub struct SearchService {
    catalog: Arc<dyn CatalogApi>,
    session: SessionService,
    history: HistoryService,
    state: Arc<RwLock<SearchSnapshot>>,
    /// Monotonic id of the most recently started request
    generation: Arc<AtomicU64>,
}

impl SearchService {
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        session: SessionService,
        history: HistoryService,
    ) -> Self {
        Self {
            catalog,
            session,
            history,
            state: Arc::new(RwLock::new(SearchSnapshot::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Runs a search for `query`.
    ///
    /// The snapshot moves to `Pending` before the catalog call is awaited,
    /// so observers can show a loading indicator right away. Results are
    /// applied in last-request-started order; a stale response is dropped
    /// silently. Under an authenticated session a successful search also
    /// records the query in the history feed, without ever altering the
    /// search outcome.
    ///
    /// # Returns
    ///
    /// The snapshot current once this request resolved, which may belong
    /// to a newer request if this one was superseded.
    pub async fn search(&self, query: &str) -> SearchSnapshot {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply_if_current(generation, SearchSnapshot::pending(query));

        match self.catalog.search(query).await {
            Ok(products) => {
                let applied =
                    self.apply_if_current(generation, SearchSnapshot::succeeded(query, products));
                if applied && self.session.is_authenticated() {
                    self.record_history(query).await;
                }
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "catalog search failed");
                self.apply_if_current(
                    generation,
                    SearchSnapshot::failed(query, GENERIC_SEARCH_ERROR),
                );
            }
        }

        self.snapshot()
    }

    /// Read-only observation of the current request state.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.read().unwrap().clone()
    }

    /// Writes `snapshot` only if `generation` still names the newest
    /// request. The check happens under the state lock: a newer `search`
    /// bumps the counter before it writes its own `Pending` snapshot, so a
    /// stale writer either sees the bump here or is overwritten by the
    /// newer pending write.
    fn apply_if_current(&self, generation: u64, snapshot: SearchSnapshot) -> bool {
        let mut state = self.state.write().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(query = %snapshot.query, "discarding stale search response");
            return false;
        }
        *state = snapshot;
        true
    }

    /// Fire-and-forget with respect to the search outcome; failures are
    /// logged and swallowed.
    async fn record_history(&self, query: &str) {
        if let Err(err) = self.history.append(query).await {
            tracing::warn!(query, error = %err, "failed to record search in history");
            return;
        }
        if let Err(err) = self.history.refresh().await {
            tracing::warn!(error = %err, "failed to refresh history feed");
        }
    }
}

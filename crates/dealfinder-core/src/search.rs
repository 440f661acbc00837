//! Search request lifecycle models.

use crate::product::Product;
use serde::{Deserialize, Serialize};

/// Lifecycle state of the current search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    /// No search issued yet
    #[default]
    Idle,
    /// A request is in flight
    Pending,
    /// The most recent request completed with results
    Succeeded,
    /// The most recent request failed; results are cleared
    Failed,
}

/// Point-in-time view of the search engine state.
///
/// Exactly one snapshot is "current" at a time; issuing a new search
/// supersedes the previous one regardless of its completion state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchSnapshot {
    /// The query text the snapshot belongs to
    pub query: String,

    pub status: SearchStatus,

    /// Results in the order the Catalog API returned them.
    /// Sorting and filtering are a derived-view concern.
    pub products: Vec<Product>,

    /// Generic user-facing message, only set when `status` is `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchSnapshot {
    /// Snapshot for a request that just started; clears any previous error.
    pub fn pending(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            status: SearchStatus::Pending,
            products: Vec::new(),
            error: None,
        }
    }

    /// Snapshot for a completed request.
    pub fn succeeded(query: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            query: query.into(),
            status: SearchStatus::Succeeded,
            products,
            error: None,
        }
    }

    /// Snapshot for a failed request. Stale results are not retained.
    pub fn failed(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            status: SearchStatus::Failed,
            products: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SearchStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;

    #[test]
    fn test_default_is_idle() {
        let snapshot = SearchSnapshot::default();
        assert_eq!(snapshot.status, SearchStatus::Idle);
        assert!(snapshot.products.is_empty());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_pending_clears_error() {
        let snapshot = SearchSnapshot::pending("laptop");
        assert!(snapshot.is_pending());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_failed_clears_results() {
        let succeeded = SearchSnapshot::succeeded(
            "laptop",
            vec![Product::listing("p-1", "Laptop", 80000, "Kilimall", "https://x", 4.0)],
        );
        assert_eq!(succeeded.products.len(), 1);

        let failed = SearchSnapshot::failed("laptop", "An error occurred while searching.");
        assert_eq!(failed.status, SearchStatus::Failed);
        assert!(failed.products.is_empty());
        assert!(failed.error.is_some());
    }
}

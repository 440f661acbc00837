//! Derived view builder.
//!
//! Produces the filtered, sorted projection of raw search results shown to
//! the user. The raw result set is never the thing being mutated here; the
//! view is recomputed from scratch on every criteria change.

use crate::product::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sort order applied to the filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Preserve the Catalog API's returned order
    #[default]
    Relevance,
    /// Ascending price
    PriceAsc,
    /// Descending price
    PriceDesc,
    /// Descending rating
    Rating,
}

/// Locally-held, ephemeral view criteria. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive lower price bound
    pub price_min: u64,
    /// Inclusive upper price bound
    pub price_max: u64,
    /// Storefronts to include. `None` means no source restriction, so a
    /// surface that never wires the checkboxes cannot silently drop
    /// products by passing an empty set.
    pub sources: Option<BTreeSet<String>>,
    pub sort: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            price_min: 0,
            price_max: u64::MAX,
            sources: None,
            sort: SortKey::Relevance,
        }
    }
}

impl FilterCriteria {
    /// Criteria restricted to a price range, everything else default.
    pub fn price_range(min: u64, max: u64) -> Self {
        Self {
            price_min: min,
            price_max: max,
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_sources(mut self, sources: BTreeSet<String>) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// Builds the derived view: filter by price and source, then stable-sort.
///
/// Pure with respect to `results`; the input slice is left untouched and
/// ties keep their filtered order under every sort key.
pub fn build_view(results: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let mut view: Vec<Product> = results
        .iter()
        .filter(|p| p.price >= criteria.price_min && p.price <= criteria.price_max)
        .filter(|p| {
            criteria
                .sources
                .as_ref()
                .is_none_or(|sources| sources.contains(&p.source))
        })
        .cloned()
        .collect();

    match criteria.sort {
        SortKey::Relevance => {}
        SortKey::PriceAsc => view.sort_by_key(|p| p.price),
        SortKey::PriceDesc => view.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => view.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    view
}

/// Distinct storefront names across the raw results, in first-seen order.
///
/// This is what a source-filter surface offers as its checkbox set.
pub fn available_sources(results: &[Product]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut sources = Vec::new();
    for product in results {
        if seen.insert(product.source.clone()) {
            sources.push(product.source.clone());
        }
    }
    sources
}

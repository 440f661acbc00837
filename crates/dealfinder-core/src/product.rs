//! Product domain model.
//!
//! Products are aggregated from multiple external storefronts and are
//! immutable once received; identity is the cross-store-unique `id`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single product as returned by the Catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Opaque, stable, cross-store-unique identifier
    pub id: String,

    /// Product display name
    pub name: String,

    /// Price in whole currency units (no minor units)
    pub price: u64,

    /// Primary product image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Name of the storefront the product was aggregated from
    pub source: String,

    /// External URL of the product on its storefront
    pub url: String,

    /// Rating in the range 0.0 to 5.0
    pub rating: f32,

    /// Longer description, only populated on the detail endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Specification label/value pairs, only populated on the detail endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<BTreeMap<String, String>>,
}

impl Product {
    /// Creates a product with only the listing fields populated.
    pub fn listing(
        id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        source: impl Into<String>,
        url: impl Into<String>,
        rating: f32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            source: source.into(),
            url: url.into(),
            rating,
            description: None,
            specs: None,
        }
    }
}

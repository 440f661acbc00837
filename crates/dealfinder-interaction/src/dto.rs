//! Wire DTOs for both remote services.
//!
//! Wire shapes follow the services' JSON contracts; conversion into domain
//! models happens here and nowhere else.

use chrono::{DateTime, Utc};
use dealfinder_core::history::HistoryEntry;
use dealfinder_core::product::Product;
use dealfinder_core::session::{AuthToken, Session};
use dealfinder_core::user::AuthOutcome;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Product as serialized by the catalog service. Prices arrive as decimals
/// but the domain treats them as whole currency units.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductDto {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    pub source: String,
    pub url: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specs: Option<BTreeMap<String, String>>,
}

impl ProductDto {
    pub(crate) fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            price: self.price.max(0.0).round() as u64,
            image: self.image,
            source: self.source,
            url: self.url,
            rating: self.rating.clamp(0.0, 5.0),
            description: self.description,
            specs: self.specs,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryEntryDto {
    pub id: i64,
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntryDto {
    pub(crate) fn into_entry(self) -> HistoryEntry {
        HistoryEntry {
            id: self.id,
            query: self.query,
            timestamp: self.timestamp,
        }
    }
}

/// Favorite rows embed the full product object.
#[derive(Debug, Deserialize)]
pub(crate) struct FavoriteDto {
    pub product: ProductDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrincipalDto {
    pub id: i64,
    pub username: String,
}

impl PrincipalDto {
    pub(crate) fn into_session(self) -> Session {
        Session {
            principal_id: self.id.to_string(),
            display_name: self.username,
        }
    }
}

/// Login and registration answer with the same shape.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponseDto {
    pub token: String,
    pub user: PrincipalDto,
}

impl AuthResponseDto {
    pub(crate) fn into_outcome(self) -> AuthOutcome {
        AuthOutcome {
            token: AuthToken::new(self.token),
            session: self.user.into_session(),
        }
    }
}

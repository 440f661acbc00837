//! HTTP client for the Catalog API.

use crate::dto::ProductDto;
use crate::http::{parse_error, status_error, transport_error};
use async_trait::async_trait;
use dealfinder_core::catalog::CatalogApi;
use dealfinder_core::error::{DealfinderError, Result};
use dealfinder_core::product::Product;
use dealfinder_core::session::AuthToken;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Catalog API implementation over the hosted REST service.
#[derive(Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    /// Creates a client for the given base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Service root, without a trailing slash
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DealfinderError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_products(&self, request: reqwest::RequestBuilder) -> Result<Vec<Product>> {
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let products: Vec<ProductDto> = response
            .json()
            .await
            .map_err(|e| parse_error("catalog product list", e))?;

        Ok(products.into_iter().map(ProductDto::into_product).collect())
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let request = self
            .client
            .get(self.endpoint("/api/products/search/"))
            .query(&[("q", query)]);
        self.fetch_products(request).await
    }

    async fn product(&self, id: &str) -> Result<Product> {
        let response = self
            .client
            .get(self.endpoint(&format!("/api/products/{id}/")))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DealfinderError::not_found("product", id));
        }
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let product: ProductDto = response
            .json()
            .await
            .map_err(|e| parse_error("catalog product detail", e))?;

        Ok(product.into_product())
    }

    async fn similar(&self, id: &str) -> Result<Vec<Product>> {
        let request = self
            .client
            .get(self.endpoint(&format!("/api/products/similar/{id}/")));
        self.fetch_products(request).await
    }

    async fn recommended(&self, token: &AuthToken) -> Result<Vec<Product>> {
        let request = self
            .client
            .get(self.endpoint("/api/products/recommended/"))
            .bearer_auth(token.as_str());
        self.fetch_products(request).await
    }
}

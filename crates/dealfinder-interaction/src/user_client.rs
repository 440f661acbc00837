//! HTTP client for the User API.

use crate::dto::{AuthResponseDto, FavoriteDto, HistoryEntryDto, PrincipalDto};
use crate::http::{parse_error, status_error, transport_error};
use async_trait::async_trait;
use dealfinder_core::error::{DealfinderError, Result};
use dealfinder_core::history::HistoryEntry;
use dealfinder_core::product::Product;
use dealfinder_core::session::{AuthToken, Credentials, Registration, Session};
use dealfinder_core::user::{AuthOutcome, UserApi};
use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use std::time::Duration;

/// User API implementation over the hosted REST service.
#[derive(Clone)]
pub struct HttpUserApi {
    client: Client,
    base_url: String,
}

impl HttpUserApi {
    /// Creates a client for the given base URL.
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

    /// Sends a mutation that carries no meaningful response body.
    async fn expect_success(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        Ok(())
    }

    async fn auth_exchange(&self, response: Response) -> Result<AuthOutcome> {
        let outcome: AuthResponseDto = response
            .json()
            .await
            .map_err(|e| parse_error("auth response", e))?;
        Ok(outcome.into_outcome())
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn current_principal(&self, token: &AuthToken) -> Result<Session> {
        let response = self
            .client
            .get(self.endpoint("/api/auth/user/"))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let principal: PrincipalDto = response
            .json()
            .await
            .map_err(|e| parse_error("current principal", e))?;

        Ok(principal.into_session())
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthOutcome> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/login/"))
            .json(credentials)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(DealfinderError::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        self.auth_exchange(response).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthOutcome> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/register/"))
            .json(registration)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::BAD_REQUEST {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "rejected by server".to_string());
            return Err(DealfinderError::RegistrationFailed(detail));
        }
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        self.auth_exchange(response).await
    }

    async fn list_favorites(&self, token: &AuthToken) -> Result<Vec<Product>> {
        let response = self
            .client
            .get(self.endpoint("/api/user/favorites/"))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let favorites: Vec<FavoriteDto> = response
            .json()
            .await
            .map_err(|e| parse_error("favorites list", e))?;

        Ok(favorites
            .into_iter()
            .map(|f| f.product.into_product())
            .collect())
    }

    async fn add_favorite(&self, token: &AuthToken, product_id: &str) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint("/api/user/favorites/"))
            .bearer_auth(token.as_str())
            .json(&json!({ "product_id": product_id }));
        self.expect_success(request).await
    }

    async fn remove_favorite(&self, token: &AuthToken, product_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.endpoint(&format!("/api/user/favorites/{product_id}/")))
            .bearer_auth(token.as_str());
        self.expect_success(request).await
    }

    async fn list_history(&self, token: &AuthToken) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.endpoint("/api/user/search-history/"))
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let entries: Vec<HistoryEntryDto> = response
            .json()
            .await
            .map_err(|e| parse_error("history list", e))?;

        Ok(entries.into_iter().map(HistoryEntryDto::into_entry).collect())
    }

    async fn append_history(&self, token: &AuthToken, query: &str) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint("/api/user/search-history/"))
            .bearer_auth(token.as_str())
            .json(&json!({ "query": query }));
        self.expect_success(request).await
    }

    async fn remove_history(&self, token: &AuthToken, entry_id: i64) -> Result<()> {
        let request = self
            .client
            .delete(self.endpoint(&format!("/api/user/search-history/{entry_id}/")))
            .bearer_auth(token.as_str());
        self.expect_success(request).await
    }

    async fn clear_history(&self, token: &AuthToken) -> Result<()> {
        let request = self
            .client
            .delete(self.endpoint("/api/user/clear/search-history/"))
            .bearer_auth(token.as_str());
        self.expect_success(request).await
    }
}

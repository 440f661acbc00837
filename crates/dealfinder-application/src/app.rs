//! Application facade.
//!
//! Wires the services over shared ports and exposes one explicit state
//! handle to the UI boundary; there are no global singletons to reach for.

use crate::favorites_service::FavoritesService;
use crate::history_service::HistoryService;
use crate::recommendation_service::RecommendationService;
use crate::search_service::SearchService;
use crate::session_service::SessionService;
use dealfinder_core::catalog::CatalogApi;
use dealfinder_core::error::{DealfinderError, Result};
use dealfinder_core::product::Product;
use dealfinder_core::search::SearchSnapshot;
use dealfinder_core::session::{Credentials, Registration, Session, TokenStore};
use dealfinder_core::user::UserApi;
use dealfinder_infrastructure::{ClientConfig, FileTokenStore};
use dealfinder_interaction::{HttpCatalogApi, HttpUserApi};
use std::sync::Arc;
use std::time::Duration;

/// The client application state handle.
#[derive(Clone)]
pub struct App {
    session: SessionService,
    search: SearchService,
    favorites: FavoritesService,
    history: HistoryService,
    recommendations: RecommendationService,
    catalog: Arc<dyn CatalogApi>,
}

impl App {
    /// Wires the services over the given ports.
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        user_api: Arc<dyn UserApi>,
        token_store: Arc<dyn TokenStore>,
    ) -> Self {
        let session = SessionService::new(user_api.clone(), token_store);
        let history = HistoryService::new(user_api.clone(), session.clone());
        let favorites = FavoritesService::new(user_api, session.clone());
        let search = SearchService::new(catalog.clone(), session.clone(), history.clone());
        let recommendations = RecommendationService::new(catalog.clone(), session.clone());

        Self {
            session,
            search,
            favorites,
            history,
            recommendations,
            catalog,
        }
    }

    /// Builds an app talking to the hosted services described by `config`,
    /// with the token persisted under the default config directory.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let catalog = HttpCatalogApi::new(&config.catalog_base_url, timeout)?;
        let user_api = HttpUserApi::new(&config.user_base_url, timeout)?;
        let token_store = FileTokenStore::new()?;

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(user_api),
            Arc::new(token_store),
        ))
    }

    /// Startup hook: silent session restore, then feed activation.
    pub async fn restore(&self) -> Option<Session> {
        let restored = self.session.restore().await;
        if restored.is_some() {
            self.activate_session().await;
        }
        restored
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let session = self.session.login(credentials).await?;
        self.activate_session().await;
        Ok(session)
    }

    pub async fn register(&self, registration: &Registration) -> Result<Session> {
        let session = self.session.register(registration).await?;
        self.activate_session().await;
        Ok(session)
    }

    /// Tears down the session and every per-user mirror.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.favorites.clear_local();
        self.history.clear_local();
        self.recommendations.clear_local();
    }

    /// Product detail for the given id.
    pub async fn product(&self, id: &str) -> Result<Product> {
        self.catalog.product(id).await
    }

    /// Products similar to the given id.
    pub async fn similar(&self, id: &str) -> Result<Vec<Product>> {
        self.catalog.similar(id).await
    }

    /// Re-runs the query behind a history entry ("search again").
    pub async fn replay(&self, entry_id: i64) -> Result<SearchSnapshot> {
        let entry = self
            .history
            .entries()
            .into_iter()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(|| DealfinderError::not_found("history entry", entry_id.to_string()))?;

        Ok(self.search.search(&entry.query).await)
    }

    pub fn session(&self) -> &SessionService {
        &self.session
    }

    pub fn search(&self) -> &SearchService {
        &self.search
    }

    pub fn favorites(&self) -> &FavoritesService {
        &self.favorites
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    pub fn recommendations(&self) -> &RecommendationService {
        &self.recommendations
    }

    /// Loads the per-user feeds after a session becomes active. Feed
    /// failures are non-fatal; the session itself is already established.
    async fn activate_session(&self) {
        if let Err(err) = self.favorites.refresh().await {
            tracing::warn!(error = %err, "failed to load favorites");
        }
        if let Err(err) = self.history.refresh().await {
            tracing::warn!(error = %err, "failed to load search history");
        }
        if let Err(err) = self.recommendations.refresh().await {
            tracing::warn!(error = %err, "failed to load recommendations");
        }
    }
}

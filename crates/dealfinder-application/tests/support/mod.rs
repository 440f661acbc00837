//! Test doubles for the core ports.
//!
//! The mocks count every network call so tests can assert that
//! session-gated failures never touch the wire, and expose gates
//! (`Notify` / `Semaphore`) to hold responses in flight for the
//! ordering scenarios.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use dealfinder_application::App;
use dealfinder_core::catalog::CatalogApi;
use dealfinder_core::error::{DealfinderError, Result};
use dealfinder_core::history::HistoryEntry;
use dealfinder_core::product::Product;
use dealfinder_core::session::{AuthToken, Credentials, Registration, Session, TokenStore};
use dealfinder_core::user::{AuthOutcome, UserApi};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

pub const VALID_TOKEN: &str = "tok-valid";

pub fn product(id: &str, price: u64) -> Product {
    Product::listing(id, format!("Item {id}"), price, "Jumia", "https://x", 4.0)
}

pub fn creds() -> Credentials {
    Credentials {
        username: "wanjiru".to_string(),
        password: "hunter2".to_string(),
    }
}

pub fn registration() -> Registration {
    Registration {
        username: "wanjiru".to_string(),
        email: "w@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

// ============================================================================
// Catalog double
// ============================================================================

#[derive(Default)]
pub struct MockCatalog {
    responses: Mutex<HashMap<String, Result<Vec<Product>>>>,
    details: Mutex<HashMap<String, Product>>,
    recommended: Mutex<Vec<Product>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    started: Mutex<Vec<String>>,
    pub search_calls: AtomicUsize,
    pub recommended_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn stub(&self, query: &str, products: Vec<Product>) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(products));
    }

    pub fn stub_failure(&self, query: &str) {
        self.responses.lock().unwrap().insert(
            query.to_string(),
            Err(DealfinderError::network("connection reset")),
        );
    }

    pub fn stub_detail(&self, product: Product) {
        self.details
            .lock()
            .unwrap()
            .insert(product.id.clone(), product);
    }

    pub fn stub_recommended(&self, products: Vec<Product>) {
        *self.recommended.lock().unwrap() = products;
    }

    /// Holds the response for `query` until the returned gate is notified.
    pub fn gate(&self, query: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(query.to_string(), gate.clone());
        gate
    }

    pub async fn wait_until_started(&self, query: &str) {
        loop {
            if self.started.lock().unwrap().iter().any(|q| q == query) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.started.lock().unwrap().push(query.to_string());

        let gate = self.gates.lock().unwrap().get(query).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn product(&self, id: &str) -> Result<Product> {
        self.details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| DealfinderError::not_found("product", id))
    }

    async fn similar(&self, _id: &str) -> Result<Vec<Product>> {
        Ok(Vec::new())
    }

    async fn recommended(&self, _token: &AuthToken) -> Result<Vec<Product>> {
        self.recommended_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.recommended.lock().unwrap().clone())
    }
}

// ============================================================================
// User API double
// ============================================================================

pub struct MockUser {
    accept_auth: AtomicBool,
    fail_favorite_mutations: AtomicBool,
    fail_history_mutations: AtomicBool,
    fail_history_appends: AtomicBool,
    favorites: Mutex<HashSet<String>>,
    history: Mutex<Vec<HistoryEntry>>,
    next_history_id: AtomicI64,
    favorite_gate: Mutex<Option<Arc<Semaphore>>>,
    /// Total calls that reached the wire, across every method
    pub network_calls: AtomicUsize,
    pub add_favorite_calls: AtomicUsize,
    pub remove_favorite_calls: AtomicUsize,
    pub favorite_calls_started: AtomicUsize,
    pub append_history_calls: AtomicUsize,
}

impl Default for MockUser {
    fn default() -> Self {
        Self {
            accept_auth: AtomicBool::new(true),
            fail_favorite_mutations: AtomicBool::new(false),
            fail_history_mutations: AtomicBool::new(false),
            fail_history_appends: AtomicBool::new(false),
            favorites: Mutex::new(HashSet::new()),
            history: Mutex::new(Vec::new()),
            next_history_id: AtomicI64::new(1),
            favorite_gate: Mutex::new(None),
            network_calls: AtomicUsize::new(0),
            add_favorite_calls: AtomicUsize::new(0),
            remove_favorite_calls: AtomicUsize::new(0),
            favorite_calls_started: AtomicUsize::new(0),
            append_history_calls: AtomicUsize::new(0),
        }
    }
}

impl MockUser {
    pub fn reject_auth(&self) {
        self.accept_auth.store(false, Ordering::SeqCst);
    }

    pub fn fail_favorite_mutations(&self) {
        self.fail_favorite_mutations.store(true, Ordering::SeqCst);
    }

    pub fn fail_history_mutations(&self) {
        self.fail_history_mutations.store(true, Ordering::SeqCst);
    }

    pub fn fail_history_mutations_off(&self) {
        self.fail_history_mutations.store(false, Ordering::SeqCst);
    }

    pub fn fail_history_appends(&self) {
        self.fail_history_appends.store(true, Ordering::SeqCst);
    }

    /// Holds favorite add/remove calls until permits are added.
    pub fn gate_favorites(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.favorite_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn server_favorites(&self) -> HashSet<String> {
        self.favorites.lock().unwrap().clone()
    }

    pub fn seed_history(&self, query: &str) -> i64 {
        let id = self.next_history_id.fetch_add(1, Ordering::SeqCst);
        self.history.lock().unwrap().insert(
            0,
            HistoryEntry {
                id,
                query: query.to_string(),
                timestamp: Utc::now(),
            },
        );
        id
    }

    fn session() -> Session {
        Session {
            principal_id: "7".to_string(),
            display_name: "wanjiru".to_string(),
        }
    }

    fn outcome() -> AuthOutcome {
        AuthOutcome {
            token: AuthToken::new(VALID_TOKEN),
            session: Self::session(),
        }
    }

    async fn pass_favorite_gate(&self) {
        self.favorite_calls_started.fetch_add(1, Ordering::SeqCst);
        let gate = self.favorite_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

#[async_trait]
impl UserApi for MockUser {
    async fn current_principal(&self, token: &AuthToken) -> Result<Session> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        if self.accept_auth.load(Ordering::SeqCst) && token.as_str() == VALID_TOKEN {
            Ok(Self::session())
        } else {
            Err(DealfinderError::server(401))
        }
    }

    async fn login(&self, _credentials: &Credentials) -> Result<AuthOutcome> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        if self.accept_auth.load(Ordering::SeqCst) {
            Ok(Self::outcome())
        } else {
            Err(DealfinderError::InvalidCredentials)
        }
    }

    async fn register(&self, _registration: &Registration) -> Result<AuthOutcome> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        if self.accept_auth.load(Ordering::SeqCst) {
            Ok(Self::outcome())
        } else {
            Err(DealfinderError::RegistrationFailed("taken".to_string()))
        }
    }

    async fn list_favorites(&self, _token: &AuthToken) -> Result<Vec<Product>> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        let mut ids: Vec<String> = self.favorites.lock().unwrap().iter().cloned().collect();
        ids.sort();
        Ok(ids.iter().map(|id| product(id, 1000)).collect())
    }

    async fn add_favorite(&self, _token: &AuthToken, product_id: &str) -> Result<()> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.add_favorite_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_favorite_gate().await;

        if self.fail_favorite_mutations.load(Ordering::SeqCst) {
            return Err(DealfinderError::server(500));
        }
        self.favorites.lock().unwrap().insert(product_id.to_string());
        Ok(())
    }

    async fn remove_favorite(&self, _token: &AuthToken, product_id: &str) -> Result<()> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.remove_favorite_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_favorite_gate().await;

        if self.fail_favorite_mutations.load(Ordering::SeqCst) {
            return Err(DealfinderError::server(500));
        }
        self.favorites.lock().unwrap().remove(product_id);
        Ok(())
    }

    async fn list_history(&self, _token: &AuthToken) -> Result<Vec<HistoryEntry>> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.history.lock().unwrap().clone())
    }

    async fn append_history(&self, _token: &AuthToken, query: &str) -> Result<()> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.append_history_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_history_appends.load(Ordering::SeqCst) {
            return Err(DealfinderError::server(500));
        }

        let id = self.next_history_id.fetch_add(1, Ordering::SeqCst);
        self.history.lock().unwrap().insert(
            0,
            HistoryEntry {
                id,
                query: query.to_string(),
                timestamp: Utc::now(),
            },
        );
        Ok(())
    }

    async fn remove_history(&self, _token: &AuthToken, entry_id: i64) -> Result<()> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_history_mutations.load(Ordering::SeqCst) {
            return Err(DealfinderError::server(500));
        }
        self.history
            .lock()
            .unwrap()
            .retain(|entry| entry.id != entry_id);
        Ok(())
    }

    async fn clear_history(&self, _token: &AuthToken) -> Result<()> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_history_mutations.load(Ordering::SeqCst) {
            return Err(DealfinderError::server(500));
        }
        self.history.lock().unwrap().clear();
        Ok(())
    }
}

// ============================================================================
// Token store double
// ============================================================================

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(AuthToken::new(token))),
        }
    }

    pub fn stored(&self) -> Option<AuthToken> {
        self.token.lock().unwrap().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub catalog: Arc<MockCatalog>,
    pub user: Arc<MockUser>,
    pub tokens: Arc<MemoryTokenStore>,
    pub app: App,
}

pub fn harness() -> Harness {
    harness_with_tokens(MemoryTokenStore::default())
}

pub fn harness_with_tokens(tokens: MemoryTokenStore) -> Harness {
    let catalog = Arc::new(MockCatalog::default());
    let user = Arc::new(MockUser::default());
    let tokens = Arc::new(tokens);
    let app = App::new(catalog.clone(), user.clone(), tokens.clone());

    Harness {
        catalog,
        user,
        tokens,
        app,
    }
}

pub async fn authenticated_harness() -> Harness {
    let h = harness();
    h.app.login(&creds()).await.unwrap();
    h
}

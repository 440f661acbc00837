//! Session lifecycle management.
//!
//! Owns the single session slot and the persisted credential token. Every
//! other service reads the slot through this service and never writes it.

use dealfinder_core::error::Result;
use dealfinder_core::session::{AuthToken, Credentials, Registration, Session, TokenStore};
use dealfinder_core::user::UserApi;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

#[derive(Default)]
struct SessionSlot {
    session: Option<Session>,
    token: Option<AuthToken>,
}

/// Tracks whether a principal is authenticated and who it is.
///
/// `restore`, `login`, `register` and `logout` are mutually exclusive with
/// respect to the slot: an internal lock serializes them so the most recent
/// completed call wins.
#[derive(Clone)]
pub struct SessionService {
    user_api: Arc<dyn UserApi>,
    token_store: Arc<dyn TokenStore>,
    slot: Arc<RwLock<SessionSlot>>,
    /// Serializes the four lifecycle operations
    auth_op: Arc<Mutex<()>>,
}

impl SessionService {
    pub fn new(user_api: Arc<dyn UserApi>, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            user_api,
            token_store,
            slot: Arc::new(RwLock::new(SessionSlot::default())),
            auth_op: Arc::new(Mutex::new(())),
        }
    }

    /// Attempts a silent restore from the persisted token at startup.
    ///
    /// On any failure (no token, invalid/expired token, network failure)
    /// the token is cleared and no session is established; restore itself
    /// never surfaces an error.
    pub async fn restore(&self) -> Option<Session> {
        let _guard = self.auth_op.lock().await;

        let token = match self.token_store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "token store unreadable, discarding token");
                self.discard_token();
                return None;
            }
        };

        match self.user_api.current_principal(&token).await {
            Ok(session) => {
                tracing::info!(principal = %session.principal_id, "session restored");
                self.fill_slot(session.clone(), token);
                Some(session)
            }
            Err(err) => {
                tracing::info!(error = %err, "persisted token rejected, clearing");
                self.discard_token();
                self.empty_slot();
                None
            }
        }
    }

    /// Exchanges credentials for a token and identity.
    ///
    /// # Returns
    ///
    /// - `Ok(session)`: Session established and token persisted
    /// - `Err(DealfinderError::InvalidCredentials)`: Remote rejection; the
    ///   slot is left as it was
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let _guard = self.auth_op.lock().await;

        let outcome = self.user_api.login(credentials).await?;
        self.persist_token(&outcome.token);
        self.fill_slot(outcome.session.clone(), outcome.token);

        tracing::info!(principal = %outcome.session.principal_id, "logged in");
        Ok(outcome.session)
    }

    /// Creates an account; the analogous creation path to `login`.
    pub async fn register(&self, registration: &Registration) -> Result<Session> {
        let _guard = self.auth_op.lock().await;

        let outcome = self.user_api.register(registration).await?;
        self.persist_token(&outcome.token);
        self.fill_slot(outcome.session.clone(), outcome.token);

        tracing::info!(principal = %outcome.session.principal_id, "registered");
        Ok(outcome.session)
    }

    /// Clears token and session unconditionally. Requires no network call
    /// and cannot fail from the caller's point of view.
    pub async fn logout(&self) {
        let _guard = self.auth_op.lock().await;

        self.discard_token();
        self.empty_slot();
        tracing::info!("logged out");
    }

    /// Returns the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.slot.read().unwrap().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.read().unwrap().session.is_some()
    }

    /// Read-only token access for sibling services.
    pub fn token(&self) -> Option<AuthToken> {
        self.slot.read().unwrap().token.clone()
    }

    fn fill_slot(&self, session: Session, token: AuthToken) {
        let mut slot = self.slot.write().unwrap();
        slot.session = Some(session);
        slot.token = Some(token);
    }

    fn empty_slot(&self) {
        let mut slot = self.slot.write().unwrap();
        *slot = SessionSlot::default();
    }

    fn persist_token(&self, token: &AuthToken) {
        // A failed write only costs the next silent restore
        if let Err(err) = self.token_store.save(token) {
            tracing::warn!(error = %err, "failed to persist credential token");
        }
    }

    fn discard_token(&self) {
        if let Err(err) = self.token_store.clear() {
            tracing::warn!(error = %err, "failed to clear credential token");
        }
    }
}

//! User API port.
//!
//! Covers identity (login/register/current principal) and the two pieces of
//! per-user state the client manages: favorites and search history.

use crate::error::Result;
use crate::history::HistoryEntry;
use crate::product::Product;
use crate::session::{AuthToken, Credentials, Registration, Session};
use async_trait::async_trait;

/// Result of a successful identity exchange (login or registration).
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: AuthToken,
    pub session: Session,
}

/// Remote per-user state and identity operations.
///
/// Every method that takes a token assumes the caller already resolved the
/// session gate locally; an expired token still surfaces as a remote error.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Resolves the principal behind a persisted token.
    ///
    /// # Returns
    ///
    /// - `Ok(session)`: Token still valid
    /// - `Err(_)`: Token invalid, expired, or the call failed
    async fn current_principal(&self, token: &AuthToken) -> Result<Session>;

    /// Exchanges credentials for a token and identity.
    ///
    /// Remote rejection surfaces as `DealfinderError::InvalidCredentials`.
    async fn login(&self, credentials: &Credentials) -> Result<AuthOutcome>;

    /// Creates an account and returns a token and identity.
    ///
    /// Remote rejection surfaces as `DealfinderError::RegistrationFailed`.
    async fn register(&self, registration: &Registration) -> Result<AuthOutcome>;

    /// Lists the principal's favorite products, most recent first.
    async fn list_favorites(&self, token: &AuthToken) -> Result<Vec<Product>>;

    async fn add_favorite(&self, token: &AuthToken, product_id: &str) -> Result<()>;

    async fn remove_favorite(&self, token: &AuthToken, product_id: &str) -> Result<()>;

    /// Lists the principal's search history, most recent first.
    async fn list_history(&self, token: &AuthToken) -> Result<Vec<HistoryEntry>>;

    /// Records a query. Dedupe and ordering are server-side concerns.
    async fn append_history(&self, token: &AuthToken, query: &str) -> Result<()>;

    async fn remove_history(&self, token: &AuthToken, entry_id: i64) -> Result<()>;

    async fn clear_history(&self, token: &AuthToken) -> Result<()>;
}

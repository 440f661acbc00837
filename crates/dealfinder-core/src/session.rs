//! Session domain model and credential types.
//!
//! A `Session` value existing is what "authenticated" means; the single
//! session slot is owned by the session service in the application layer.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The authenticated principal for the current client run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Identifier issued by the User API
    pub principal_id: String,
    /// Name shown in the UI chrome
    pub display_name: String,
}

/// Login credentials exchanged for a token and identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Profile submitted on the registration path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Opaque credential token issued by the User API.
///
/// Exactly one token is persisted per running client; it is cleared on
/// logout or on restore failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Persistence for the single client-local credential token.
///
/// Only the session service's own operations write through this trait;
/// every other component treats the token as read-only.
pub trait TokenStore: Send + Sync {
    /// Loads the persisted token, if any.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(token))`: A token was persisted
    /// - `Ok(None)`: No token persisted
    /// - `Err(_)`: Storage could not be read
    fn load(&self) -> Result<Option<AuthToken>>;

    /// Persists the token, replacing any previous one.
    fn save(&self, token: &AuthToken) -> Result<()>;

    /// Removes the persisted token. Removing an absent token is not an error.
    fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = AuthToken::new("abc123");
        let json = serde_json::to_string(&token).unwrap();
        let back: AuthToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
        assert_eq!(back.as_str(), "abc123");
    }
}

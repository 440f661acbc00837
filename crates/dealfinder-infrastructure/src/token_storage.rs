//! File-backed credential token storage.
//!
//! Persists the single client-local token as JSON under the config
//! directory. Only the session service writes through this store.

use crate::paths::DealfinderPaths;
use dealfinder_core::error::{DealfinderError, Result};
use dealfinder_core::session::{AuthToken, TokenStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    token: AuthToken,
}

/// Token storage backed by `~/.config/dealfinder/token.json`.
///
/// Responsibilities:
/// - Load the persisted token at startup (silent restore)
/// - Replace it on login/registration
/// - Remove it on logout or restore failure
///
/// # Security Note
///
/// The token is stored as plaintext JSON. The file should carry restrictive
/// permissions (e.g., 600) to prevent unauthorized access.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default path (~/.config/dealfinder/token.json).
    ///
    /// # Returns
    ///
    /// - `Ok(FileTokenStore)`: Successfully determined config path
    /// - `Err(DealfinderError::Config)`: Could not find home directory
    pub fn new() -> Result<Self> {
        let path = DealfinderPaths::token_file()
            .map_err(|e| DealfinderError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the token file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let file: TokenFile = serde_json::from_str(&content)?;

        Ok(Some(file.token))
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&TokenFile {
            token: token.clone(),
        })?;
        fs::write(&self.path, content)?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

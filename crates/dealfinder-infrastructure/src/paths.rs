//! Unified path management for dealfinder client files.
//!
//! All client-local state lives under one config directory so that logout
//! and uninstall have a single place to look.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the dealfinder client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/dealfinder/        # Config directory
/// ├── config.toml              # API endpoints and client settings
/// └── token.json               # Persisted credential token (cleared on logout)
/// ```
pub struct DealfinderPaths;

impl DealfinderPaths {
    /// Returns the dealfinder configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/dealfinder/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("dealfinder"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted credential token file.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("token.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_file_is_under_config_dir() {
        let dir = DealfinderPaths::config_dir().unwrap();
        let token = DealfinderPaths::token_file().unwrap();
        assert!(token.starts_with(&dir));
        assert_eq!(token.file_name().unwrap(), "token.json");
    }
}

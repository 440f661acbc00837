pub mod client_config;
pub mod paths;
pub mod token_storage;

pub use crate::client_config::{ClientConfig, ConfigStorage};
pub use crate::paths::DealfinderPaths;
pub use crate::token_storage::FileTokenStore;

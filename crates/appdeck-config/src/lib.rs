//! # AppDeck Config
//!
//! Configuration types for the AppDeck API, loaded from environment variables.
//!
//! - [`auth`]: Authentication mode and JWT verification settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Bind address and log directory
//! - [`storage`]: Flat-file locations (admin allowlist, app catalog, static assets)
//!
//! Every struct exposes `from_env()` plus a `from_lookup()` variant that takes
//! a key lookup function, so tests never have to touch the process
//! environment. Empty values are treated as unset.
//!
//! # Example
//!
//! ```ignore
//! use appdeck_config::{AuthConfig, CorsConfig, StorageConfig};
//!
//! let auth_config = AuthConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod server;
pub mod storage;

pub use auth::{AuthConfig, AuthMode, ConfigError};
pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Reads an environment variable, treating empty or whitespace-only values as unset.
pub(crate) fn env_var(key: &str) -> Option<String> {
    non_empty(std::env::var(key).ok())
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

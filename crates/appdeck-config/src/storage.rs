use std::path::PathBuf;

use crate::{env_var, non_empty};

/// Locations of the flat files the API reads and writes.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// JSON document of the form `{"admins": ["a@b.com", ...]}`.
    pub admin_users_path: PathBuf,
    /// JSON array holding the admin-managed app catalog.
    pub apps_file_path: PathBuf,
    /// Optional directory of built frontend assets served as a fallback.
    pub static_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            admin_users_path: non_empty(lookup("ADMIN_USERS_PATH"))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/admin_users.json")),
            apps_file_path: non_empty(lookup("APPS_FILE_PATH"))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/apps.json")),
            static_dir: non_empty(lookup("STATIC_DIR")).map(PathBuf::from),
        }
    }
}

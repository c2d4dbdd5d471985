use std::path::PathBuf;

use crate::{env_var, non_empty};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            addr: non_empty(lookup("SERVER_ADDR")).unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            log_dir: non_empty(lookup("LOG_DIR"))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("storage/logs")),
        }
    }
}

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::{env_var, non_empty};

/// Errors raised while reading configuration. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown AUTH_MODE '{0}', expected 'login' or 'sso'")]
    UnknownAuthMode(String),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// How bearer tokens are verified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Tokens are issued by this service and signed with a shared secret.
    #[default]
    Login,
    /// Tokens are issued by an external identity provider and verified with its public key.
    Sso,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Sso => "sso",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(AuthMode::Login),
            "sso" => Ok(AuthMode::Sso),
            _ => Err(ConfigError::UnknownAuthMode(s.to_string())),
        }
    }
}

/// Raw authentication settings.
///
/// Which fields are required depends on [`AuthMode`]; that is enforced when the
/// token verifier is built, not here, so that a single place owns the rules.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub mode: AuthMode,
    /// Shared HMAC secret (`JWT_SECRET`), login mode only.
    pub secret: Option<String>,
    /// Path to the identity provider's PEM public key (`JWT_PUBLIC_KEY_PATH`), sso mode only.
    pub public_key_path: Option<PathBuf>,
    /// Algorithm override (`JWT_ALGORITHM`); the mode default applies when unset.
    pub algorithm: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Lifetime in seconds of tokens minted by the CLI in login mode.
    pub access_token_expiry: i64,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match non_empty(lookup("AUTH_MODE")) {
            Some(raw) => raw.parse()?,
            None => AuthMode::default(),
        };

        let access_token_expiry = match non_empty(lookup("JWT_ACCESS_EXPIRY")) {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "JWT_ACCESS_EXPIRY",
                    value: raw,
                })?,
            None => 3600, // 1 hour
        };

        Ok(Self {
            mode,
            // Used byte for byte as the HMAC key, so only blank values are dropped.
            secret: lookup("JWT_SECRET").filter(|v| !v.trim().is_empty()),
            public_key_path: non_empty(lookup("JWT_PUBLIC_KEY_PATH")).map(PathBuf::from),
            algorithm: non_empty(lookup("JWT_ALGORITHM")),
            issuer: non_empty(lookup("JWT_ISSUER")),
            audience: non_empty(lookup("JWT_AUDIENCE")),
            access_token_expiry,
        })
    }

    /// Login-mode config with the given secret and nothing else asserted.
    pub fn login(secret: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            secret: Some(secret.into()),
            public_key_path: None,
            algorithm: None,
            issuer: None,
            audience: None,
            access_token_expiry: 3600,
        }
    }

    /// SSO-mode config reading the public key from `public_key_path`.
    pub fn sso(public_key_path: impl Into<PathBuf>) -> Self {
        Self {
            mode: AuthMode::Sso,
            secret: None,
            public_key_path: Some(public_key_path.into()),
            algorithm: None,
            issuer: None,
            audience: None,
            access_token_expiry: 3600,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }
}

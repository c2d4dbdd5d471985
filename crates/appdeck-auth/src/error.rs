//! Authentication errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Key material or settings are unusable. Raised only while building the
    /// verifier; the process must not start serving.
    #[error("auth configuration error: {0}")]
    Configuration(String),

    /// No bearer token was presented.
    #[error("missing bearer credentials")]
    MissingCredentials,

    /// Malformed token, bad signature, rejected claims or no email claim.
    /// Retrying with the same token cannot succeed.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Valid identity lacking the required role.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl AuthError {
    /// True for errors caused by the caller's credentials rather than by
    /// their privileges or by server configuration.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AuthError::MissingCredentials | AuthError::InvalidToken(_))
    }
}

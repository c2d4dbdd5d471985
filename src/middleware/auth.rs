use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use appdeck_auth::{AuthError, AuthenticatedIdentity};
use appdeck_core::AppError;

use crate::state::AppState;

/// Extractor for any authenticated caller.
///
/// The identity has already been through the role resolver, so
/// [`is_admin`](Self::is_admin) reflects the allowlist.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedIdentity);

impl AuthUser {
    pub fn identity(&self) -> &AuthenticatedIdentity {
        &self.0
    }

    pub fn email(&self) -> &str {
        self.0.email()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.0.display_name()
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by an earlier guard on the same request.
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    debug!(reason = %rejection, "Rejected request without bearer token");
                    auth_error(AuthError::MissingCredentials)
                })?;

        let identity = state
            .authenticator
            .authenticate(bearer.token())
            .map_err(auth_error)?;

        let auth_user = AuthUser(identity);
        parts.extensions.insert(auth_user.clone());

        Ok(auth_user)
    }
}

/// Maps the auth taxonomy onto HTTP statuses.
///
/// Token problems share one generic message so callers cannot probe which
/// check failed; the specific reason is in the server log.
pub fn auth_error(err: AuthError) -> AppError {
    match err {
        AuthError::MissingCredentials => {
            AppError::unauthorized("Missing or invalid authorization header")
        }
        AuthError::InvalidToken(_) => AppError::unauthorized("Invalid or expired token"),
        AuthError::Forbidden(message) => AppError::forbidden(message),
        err @ AuthError::Configuration(_) => AppError::internal(err),
    }
}

//! Admin authorization for Axum
//!
//! Three ways to require an admin, all backed by the same allowlist check:
//! 1. Route middleware via `require_admin`
//! 2. The `RequireAdmin` extractor
//! 3. `check_admin` for handler code

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use appdeck_core::AppError;

use crate::middleware::auth::{AuthUser, auth_error};
use crate::state::AppState;

/// Middleware that lets only admins through.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::middleware::role::require_admin;
///
/// let admin_routes = Router::new()
///     .route("/apps", get(list_apps))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_admin(&auth_user)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Extractor for admin-only handlers.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn handler(RequireAdmin(auth_user): RequireAdmin) -> Result<Json<Response>, AppError> {
///     // Only admins reach this point
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_admin(&auth_user)?;

        Ok(RequireAdmin(auth_user))
    }
}

/// 403 unless the caller is an admin.
pub fn check_admin(auth_user: &AuthUser) -> Result<(), AppError> {
    appdeck_auth::require_admin(auth_user.identity()).map_err(auth_error)
}

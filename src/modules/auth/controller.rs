use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::{AuthConfigResponse, MeResponse};
use crate::state::AppState;

/// Which authentication mode the server runs in
#[utoipa::path(
    get,
    path = "/api/auth/config",
    responses(
        (status = 200, description = "Active auth mode", body = AuthConfigResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_auth_config(State(state): State<AppState>) -> Json<AuthConfigResponse> {
    Json(AuthConfigResponse {
        mode: state.authenticator.mode().to_string(),
    })
}

/// The authenticated caller
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current identity and roles", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = appdeck_core::ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(auth_user), fields(email = %auth_user.email()))]
pub async fn get_me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse::from(auth_user.identity()))
}

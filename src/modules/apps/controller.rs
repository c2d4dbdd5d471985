use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use appdeck_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::apps::model::{CatalogApp, FavoriteToggleResponse};
use crate::modules::apps::service::CatalogService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/apps",
    responses(
        (status = 200, description = "Active apps, with the caller's favorites marked", body = Vec<CatalogApp>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Apps",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email()))]
pub async fn get_apps(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<CatalogApp>>, AppError> {
    let apps = CatalogService::catalog_for(&state.app_store, &state.db, auth_user.email()).await?;
    Ok(Json(apps))
}

#[utoipa::path(
    post,
    path = "/api/apps/{id}/favorite",
    params(
        ("id" = Uuid, Path, description = "App ID")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = FavoriteToggleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "App not found")
    ),
    tag = "Apps",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email()))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteToggleResponse>, AppError> {
    let action =
        CatalogService::toggle_favorite(&state.app_store, &state.db, auth_user.email(), id).await?;
    Ok(Json(FavoriteToggleResponse::new(action)))
}

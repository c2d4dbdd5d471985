use axum::{Json, extract::State};
use tracing::instrument;

use appdeck_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::preferences::model::{UpdateFavoritesDto, UpdateThemeDto, UserPreference};
use crate::modules::preferences::service::PreferenceService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/preferences",
    responses(
        (status = 200, description = "Caller's preferences, created with defaults on first use", body = UserPreference),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Preferences",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email()))]
pub async fn get_preferences(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserPreference>, AppError> {
    let pref = PreferenceService::get_or_create(&state.db, auth_user.email()).await?;
    Ok(Json(pref))
}

#[utoipa::path(
    put,
    path = "/api/preferences/theme",
    request_body = UpdateThemeDto,
    responses(
        (status = 200, description = "Theme updated", body = UserPreference),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Theme must be light or dark")
    ),
    tag = "Preferences",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email()))]
pub async fn update_theme(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateThemeDto>,
) -> Result<Json<UserPreference>, AppError> {
    let pref = PreferenceService::update_theme(&state.db, auth_user.email(), &dto.theme).await?;
    Ok(Json(pref))
}

#[utoipa::path(
    put,
    path = "/api/preferences/favorites",
    request_body = UpdateFavoritesDto,
    responses(
        (status = 200, description = "Favorites replaced", body = UserPreference),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Favorites must be unique")
    ),
    tag = "Preferences",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email()))]
pub async fn update_favorites(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateFavoritesDto>,
) -> Result<Json<UserPreference>, AppError> {
    let pref =
        PreferenceService::update_favorites(&state.db, auth_user.email(), dto.favorites).await?;
    Ok(Json(pref))
}

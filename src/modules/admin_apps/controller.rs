use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{info, instrument};
use uuid::Uuid;

use appdeck_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::admin_apps::model::{
    AllowlistReloadResponse, App, CreateAppDto, StatusResponse, UpdateAppDto,
};
use crate::modules::admin_apps::service::AdminAppService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/admin/apps",
    responses(
        (status = 200, description = "Every app in the catalog, active or not", body = Vec<App>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_apps(State(state): State<AppState>) -> Result<Json<Vec<App>>, AppError> {
    let apps = AdminAppService::list_apps(&state.app_store).await?;
    Ok(Json(apps))
}

#[utoipa::path(
    post,
    path = "/api/admin/apps",
    request_body = CreateAppDto,
    responses(
        (status = 201, description = "App created", body = App),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 409, description = "App name or route already exists"),
        (status = 422, description = "Invalid app name")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_app(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAppDto>,
) -> Result<(StatusCode, Json<App>), AppError> {
    let app = AdminAppService::create_app(&state.app_store, dto).await?;
    Ok((StatusCode::CREATED, Json(app)))
}

#[utoipa::path(
    put,
    path = "/api/admin/apps/{id}",
    params(
        ("id" = Uuid, Path, description = "App ID")
    ),
    request_body = UpdateAppDto,
    responses(
        (status = 200, description = "App updated", body = App),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "App not found"),
        (status = 409, description = "App name or route already exists"),
        (status = 422, description = "Invalid app name")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_app(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAppDto>,
) -> Result<Json<App>, AppError> {
    let app = AdminAppService::update_app(&state.app_store, id, dto).await?;
    Ok(Json(app))
}

#[utoipa::path(
    delete,
    path = "/api/admin/apps/{id}",
    params(
        ("id" = Uuid, Path, description = "App ID")
    ),
    responses(
        (status = 200, description = "App deleted", body = StatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required"),
        (status = 404, description = "App not found")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_app(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    AdminAppService::delete_app(&state.app_store, id).await?;
    Ok(Json(StatusResponse::success()))
}

#[utoipa::path(
    post,
    path = "/api/admin/allowlist/reload",
    responses(
        (status = 200, description = "Allowlist reloaded", body = AllowlistReloadResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - administrator privileges required")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.email()))]
pub async fn reload_allowlist(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Json<AllowlistReloadResponse> {
    let admins = state.authenticator.resolver().allowlist().reload();
    info!(admins, "Admin allowlist reloaded on request");

    Json(AllowlistReloadResponse { admins })
}

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use appdeck_core::ErrorResponse;

use crate::modules::admin_apps::model::{
    AllowlistReloadResponse, App, CreateAppDto, StatusResponse, UpdateAppDto,
};
use crate::modules::apps::model::{CatalogApp, FavoriteAction, FavoriteToggleResponse};
use crate::modules::auth::model::{AuthConfigResponse, MeResponse};
use crate::modules::health::HealthResponse;
use crate::modules::preferences::model::{UpdateFavoritesDto, UpdateThemeDto, UserPreference};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::auth::controller::get_auth_config,
        crate::modules::auth::controller::get_me,
        crate::modules::apps::controller::get_apps,
        crate::modules::apps::controller::toggle_favorite,
        crate::modules::admin_apps::controller::list_apps,
        crate::modules::admin_apps::controller::create_app,
        crate::modules::admin_apps::controller::update_app,
        crate::modules::admin_apps::controller::delete_app,
        crate::modules::admin_apps::controller::reload_allowlist,
        crate::modules::preferences::controller::get_preferences,
        crate::modules::preferences::controller::update_theme,
        crate::modules::preferences::controller::update_favorites,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            AuthConfigResponse,
            MeResponse,
            App,
            CreateAppDto,
            UpdateAppDto,
            StatusResponse,
            AllowlistReloadResponse,
            CatalogApp,
            FavoriteAction,
            FavoriteToggleResponse,
            UserPreference,
            UpdateThemeDto,
            UpdateFavoritesDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Auth mode and current identity"),
        (name = "Apps", description = "App catalog for signed-in users"),
        (name = "Admin", description = "App catalog management, admins only"),
        (name = "Preferences", description = "Per-user theme and favorites")
    ),
    info(
        title = "AppDeck API",
        version = "0.1.0",
        description = "Apps catalog and user preferences behind JWT authentication with login and SSO modes.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

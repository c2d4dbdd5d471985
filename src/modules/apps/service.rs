use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use appdeck_core::AppError;

use crate::modules::admin_apps::model::App;
use crate::modules::admin_apps::store::AppStore;
use crate::modules::apps::model::{CatalogApp, FavoriteAction};
use crate::modules::preferences::service::PreferenceService;

pub struct CatalogService;

impl CatalogService {
    /// Active apps with the caller's favorites marked.
    #[instrument(skip(store, db))]
    pub async fn catalog_for(
        store: &AppStore,
        db: &PgPool,
        email: &str,
    ) -> Result<Vec<CatalogApp>, AppError> {
        let apps = store.load().await?;
        let prefs = PreferenceService::get_or_create(db, email).await?;

        Ok(build_catalog(apps, &prefs.favorites))
    }

    /// Adds or removes `app_id` from the caller's favorites.
    #[instrument(skip(store, db))]
    pub async fn toggle_favorite(
        store: &AppStore,
        db: &PgPool,
        email: &str,
        app_id: Uuid,
    ) -> Result<FavoriteAction, AppError> {
        let apps = store.load().await?;
        if !apps.iter().any(|app| app.id == app_id) {
            return Err(AppError::not_found(anyhow!("App not found")));
        }

        let (action, _) =
            PreferenceService::modify_favorites(db, email, |favorites| toggle(favorites, app_id))
                .await?;
        debug!(app_id = %app_id, action = ?action, "Favorite toggled");

        Ok(action)
    }
}

fn build_catalog(apps: Vec<App>, favorites: &[Uuid]) -> Vec<CatalogApp> {
    apps.into_iter()
        .filter(|app| app.is_active)
        .map(|app| {
            let is_favorite = favorites.contains(&app.id);
            CatalogApp::from_app(app, is_favorite)
        })
        .collect()
}

fn toggle(favorites: &mut Vec<Uuid>, app_id: Uuid) -> FavoriteAction {
    match favorites.iter().position(|id| *id == app_id) {
        Some(idx) => {
            favorites.remove(idx);
            FavoriteAction::Removed
        }
        None => {
            favorites.push(app_id);
            FavoriteAction::Added
        }
    }
}

use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use appdeck_core::AppError;

use super::model::{App, CreateAppDto, UpdateAppDto};
use super::store::AppStore;

pub struct AdminAppService;

impl AdminAppService {
    #[instrument(skip(store))]
    pub async fn list_apps(store: &AppStore) -> Result<Vec<App>, AppError> {
        store.load().await
    }

    #[instrument(skip(store))]
    pub async fn create_app(store: &AppStore, dto: CreateAppDto) -> Result<App, AppError> {
        let app = store
            .update(|apps| {
                ensure_unique(apps, None, Some(dto.name.as_str()), Some(dto.route.as_str()))?;

                let app = App {
                    id: Uuid::new_v4(),
                    name: dto.name,
                    description: dto.description,
                    category: dto.category,
                    route: dto.route,
                    is_active: dto.is_active,
                };
                apps.push(app.clone());
                Ok(app)
            })
            .await?;

        info!(app_id = %app.id, name = %app.name, "App created");
        Ok(app)
    }

    #[instrument(skip(store))]
    pub async fn update_app(
        store: &AppStore,
        app_id: Uuid,
        dto: UpdateAppDto,
    ) -> Result<App, AppError> {
        let app = store
            .update(|apps| {
                let idx = apps
                    .iter()
                    .position(|a| a.id == app_id)
                    .ok_or_else(|| AppError::not_found(anyhow!("App not found")))?;

                ensure_unique(apps, Some(app_id), dto.name.as_deref(), dto.route.as_deref())?;

                let app = &mut apps[idx];
                if let Some(name) = dto.name {
                    app.name = name;
                }
                if let Some(description) = dto.description {
                    app.description = description;
                }
                if let Some(category) = dto.category {
                    app.category = category;
                }
                if let Some(route) = dto.route {
                    app.route = route;
                }
                if let Some(is_active) = dto.is_active {
                    app.is_active = is_active;
                }

                Ok(app.clone())
            })
            .await?;

        info!(app_id = %app.id, "App updated");
        Ok(app)
    }

    #[instrument(skip(store))]
    pub async fn delete_app(store: &AppStore, app_id: Uuid) -> Result<(), AppError> {
        store
            .update(|apps| {
                let idx = apps
                    .iter()
                    .position(|a| a.id == app_id)
                    .ok_or_else(|| AppError::not_found(anyhow!("App not found")))?;
                apps.remove(idx);
                Ok(())
            })
            .await?;

        info!(app_id = %app_id, "App deleted");
        Ok(())
    }
}

/// Names are unique ignoring case, routes are unique exactly. `except` is the
/// app being updated, which may keep its own name and route.
fn ensure_unique(
    apps: &[App],
    except: Option<Uuid>,
    name: Option<&str>,
    route: Option<&str>,
) -> Result<(), AppError> {
    for app in apps.iter().filter(|a| Some(a.id) != except) {
        if let Some(name) = name
            && app.name.to_lowercase() == name.to_lowercase()
        {
            return Err(AppError::conflict(anyhow!("App name already exists")));
        }
        if let Some(route) = route
            && app.route == route
        {
            return Err(AppError::conflict(anyhow!("App route already exists")));
        }
    }

    Ok(())
}

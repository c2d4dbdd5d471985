use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::admin_apps::model::App;

pub const DEFAULT_ICON: &str = "Box";
pub const ACTIVE_STATUS: &str = "Active";

/// An app as the workspace UI shows it to a signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogApp {
    pub id: Uuid,
    pub name: String,
    pub desc: String,
    pub category: String,
    pub url: String,
    pub icon: String,
    pub status: String,
    pub is_favorite: bool,
}

impl CatalogApp {
    pub fn from_app(app: App, is_favorite: bool) -> Self {
        Self {
            id: app.id,
            name: app.name,
            desc: app.description,
            category: app.category,
            url: app.route,
            icon: DEFAULT_ICON.to_string(),
            status: ACTIVE_STATUS.to_string(),
            is_favorite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Added,
    Removed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggleResponse {
    pub status: String,
    pub action: FavoriteAction,
    pub is_favorite: bool,
}

impl FavoriteToggleResponse {
    pub fn new(action: FavoriteAction) -> Self {
        Self {
            status: "success".to_string(),
            action,
            is_favorite: action == FavoriteAction::Added,
        }
    }
}

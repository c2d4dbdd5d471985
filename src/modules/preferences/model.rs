use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const THEMES: [&str; 2] = ["light", "dark"];
pub const DEFAULT_THEME: &str = "dark";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserPreference {
    pub id: Uuid,
    pub email: String,
    pub theme: String,
    /// Favorite app ids.
    #[schema(value_type = Vec<Uuid>)]
    pub favorites: Json<Vec<Uuid>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateThemeDto {
    #[validate(custom(function = "validate_theme"))]
    pub theme: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFavoritesDto {
    #[validate(custom(function = "validate_unique_favorites"))]
    pub favorites: Vec<Uuid>,
}

pub fn validate_theme(theme: &str) -> Result<(), ValidationError> {
    if THEMES.contains(&theme) {
        return Ok(());
    }
    Err(ValidationError::new("theme").with_message(Cow::Borrowed("Theme must be light or dark")))
}

pub fn validate_unique_favorites(favorites: &[Uuid]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(favorites.len());
    if favorites.iter().all(|id| seen.insert(*id)) {
        return Ok(());
    }
    Err(ValidationError::new("favorites").with_message(Cow::Borrowed("Favorites must be unique")))
}

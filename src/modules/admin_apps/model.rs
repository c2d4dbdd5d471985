use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Catalog entry as stored in the apps file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub route: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppDto {
    #[validate(custom(function = "validate_app_name"))]
    pub name: String,
    pub description: String,
    pub category: String,
    #[validate(length(min = 1, message = "route must not be empty"))]
    pub route: String,
    pub is_active: bool,
}

/// Partial update; absent fields are left as they are.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppDto {
    #[validate(custom(function = "validate_app_name"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(length(min = 1, message = "route must not be empty"))]
    pub route: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllowlistReloadResponse {
    /// Number of admin emails now in effect.
    pub admins: usize,
}

/// App names are non-empty and limited to ASCII letters, digits, `_` and `-`.
pub fn validate_app_name(name: &str) -> Result<(), ValidationError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("app_name").with_message(Cow::Borrowed(
            "name may only contain letters, digits, '_' and '-'",
        )))
    }
}

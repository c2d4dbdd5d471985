use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use appdeck_auth::{AuthenticatedIdentity, Role};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthConfigResponse {
    /// `login` or `sso`; tells the frontend which sign-in flow to run.
    pub mode: String,
}

/// The caller's identity after role resolution.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub email: String,
    pub name: Option<String>,
    #[schema(value_type = Vec<String>, example = json!(["user", "admin"]))]
    pub roles: Vec<Role>,
    pub is_admin: bool,
}

impl From<&AuthenticatedIdentity> for MeResponse {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            email: identity.email().to_string(),
            name: identity.display_name().map(str::to_string),
            roles: identity.roles().iter().copied().collect(),
            is_admin: identity.is_admin(),
        }
    }
}

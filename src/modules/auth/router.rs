use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_auth_config, get_me};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_auth_config))
        .route("/me", get(get_me))
}

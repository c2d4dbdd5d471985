use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_apps, toggle_favorite};

pub fn init_apps_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_apps))
        .route("/{id}/favorite", post(toggle_favorite))
}

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{get_preferences, update_favorites, update_theme};

pub fn init_preferences_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_preferences))
        .route("/theme", put(update_theme))
        .route("/favorites", put(update_favorites))
}

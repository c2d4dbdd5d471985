use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{create_app, delete_app, list_apps, reload_allowlist, update_app};

/// Routes under `/api/admin`. The caller layers the admin guard on top.
pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/apps", get(list_apps).post(create_app))
        .route("/apps/{id}", put(update_app).delete(delete_app))
        .route("/allowlist/reload", post(reload_allowlist))
}

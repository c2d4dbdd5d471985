use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use appdeck_auth::{AdminAllowlist, Authenticator, RoleResolver, TokenVerifier};
use appdeck_config::{AuthConfig, CorsConfig, StorageConfig};
use appdeck_db::init_db_pool;

use crate::modules::admin_apps::AppStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub authenticator: Authenticator,
    pub app_store: Arc<AppStore>,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
}

impl AppState {
    /// Wires the auth pipeline and the app store from already-loaded config.
    ///
    /// Fails only when the token verifier cannot be built, which is fatal at
    /// startup.
    pub fn build(
        db: PgPool,
        auth_config: &AuthConfig,
        cors_config: CorsConfig,
        storage_config: StorageConfig,
    ) -> anyhow::Result<Self> {
        let verifier = TokenVerifier::from_config(auth_config)?;
        let allowlist = AdminAllowlist::from_path(&storage_config.admin_users_path);
        let authenticator = Authenticator::new(
            Arc::new(verifier),
            RoleResolver::new(Arc::new(allowlist)),
        );
        let app_store = Arc::new(AppStore::new(&storage_config.apps_file_path));

        Ok(Self {
            db,
            authenticator,
            app_store,
            cors_config,
            storage_config,
        })
    }
}

/// Reads configuration from the environment, connects to the database and
/// applies pending migrations.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let auth_config = AuthConfig::from_env()?;
    let cors_config = CorsConfig::from_env();
    let storage_config = StorageConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    AppState::build(db, &auth_config, cors_config, storage_config)
}

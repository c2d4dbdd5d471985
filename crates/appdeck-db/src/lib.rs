//! # AppDeck DB
//!
//! PostgreSQL connection pool for the AppDeck API. Only user preferences live
//! in the database; everything else is flat files.
//!
//! # Example
//!
//! ```ignore
//! use appdeck_db::init_db_pool;
//!
//! let database_url = std::env::var("DATABASE_URL")?;
//! let pool = init_db_pool(&database_url).await?;
//! ```

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Connects a PostgreSQL pool to `database_url`.
///
/// Called once at startup; the returned pool is cheaply cloneable and lives
/// in the application state.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!("Database pool initialized");

    Ok(pool)
}

/// Builds a pool that only connects on first use.
///
/// Lets routes that never touch the database run without PostgreSQL, which
/// the HTTP tests rely on.
pub fn lazy_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;

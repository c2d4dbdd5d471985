use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use appdeck_core::AppError;

use crate::modules::preferences::model::{DEFAULT_THEME, UserPreference};

const PREFERENCE_COLUMNS: &str = "id, email, theme, favorites, updated_at";

pub struct PreferenceService;

impl PreferenceService {
    /// Returns the caller's preferences, creating the default row on first use.
    #[instrument(skip(db))]
    pub async fn get_or_create(db: &PgPool, email: &str) -> Result<UserPreference, AppError> {
        insert_default(db, email).await?;

        let pref = sqlx::query_as::<_, UserPreference>(&format!(
            "SELECT {} FROM user_preferences WHERE email = $1",
            PREFERENCE_COLUMNS
        ))
        .bind(email)
        .fetch_one(db)
        .await?;

        Ok(pref)
    }

    #[instrument(skip(db))]
    pub async fn update_theme(
        db: &PgPool,
        email: &str,
        theme: &str,
    ) -> Result<UserPreference, AppError> {
        Self::get_or_create(db, email).await?;

        let pref = sqlx::query_as::<_, UserPreference>(&format!(
            r#"UPDATE user_preferences
               SET theme = $2, updated_at = NOW()
               WHERE email = $1
               RETURNING {}"#,
            PREFERENCE_COLUMNS
        ))
        .bind(email)
        .bind(theme)
        .fetch_one(db)
        .await?;

        Ok(pref)
    }

    #[instrument(skip(db))]
    pub async fn update_favorites(
        db: &PgPool,
        email: &str,
        favorites: Vec<Uuid>,
    ) -> Result<UserPreference, AppError> {
        Self::get_or_create(db, email).await?;

        let pref = sqlx::query_as::<_, UserPreference>(&format!(
            r#"UPDATE user_preferences
               SET favorites = $2, updated_at = NOW()
               WHERE email = $1
               RETURNING {}"#,
            PREFERENCE_COLUMNS
        ))
        .bind(email)
        .bind(Json(favorites))
        .fetch_one(db)
        .await?;

        Ok(pref)
    }

    /// Applies `f` to the caller's favorites under a row lock, so concurrent
    /// changes for the same user are serialized instead of overwriting each
    /// other.
    #[instrument(skip(db, f))]
    pub async fn modify_favorites<F, T>(
        db: &PgPool,
        email: &str,
        f: F,
    ) -> Result<(T, UserPreference), AppError>
    where
        F: FnOnce(&mut Vec<Uuid>) -> T,
    {
        let mut tx = db.begin().await?;

        insert_default(&mut *tx, email).await?;

        let Json(mut favorites) = sqlx::query_scalar::<_, Json<Vec<Uuid>>>(
            "SELECT favorites FROM user_preferences WHERE email = $1 FOR UPDATE",
        )
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = f(&mut favorites);

        let pref = sqlx::query_as::<_, UserPreference>(&format!(
            r#"UPDATE user_preferences
               SET favorites = $2, updated_at = NOW()
               WHERE email = $1
               RETURNING {}"#,
            PREFERENCE_COLUMNS
        ))
        .bind(email)
        .bind(Json(favorites))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((outcome, pref))
    }
}

/// Inserts the default row for `email` unless one already exists.
async fn insert_default<'e>(executor: impl PgExecutor<'e>, email: &str) -> Result<(), AppError> {
    let inserted = sqlx::query(
        r#"INSERT INTO user_preferences (email, theme, favorites)
           VALUES ($1, $2, '[]'::jsonb)
           ON CONFLICT (email) DO NOTHING"#,
    )
    .bind(email)
    .bind(DEFAULT_THEME)
    .execute(executor)
    .await?;

    if inserted.rows_affected() > 0 {
        info!(email = %email, "Created default preferences");
    }

    Ok(())
}

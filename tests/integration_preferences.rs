mod common;

use axum::http::StatusCode;
use common::{TestApp, get, request, setup_db_test_app, token_for};
use serde_json::{Value, json};
use sqlx::PgPool;

const ADMIN: &str = "admin@example.com";
const USER: &str = "user@example.com";

async fn create_app(app: &TestApp, name: &str) -> String {
    let token = token_for(ADMIN);
    let (status, body) = app
        .send(request(
            "POST",
            "/api/admin/apps",
            Some(&token),
            Some(json!({
                "name": name,
                "description": format!("{} description", name),
                "category": "Tools",
                "route": format!("/{}", name),
                "isActive": true
            })),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn favorites_of(app: &TestApp, email: &str) -> Vec<String> {
    let token = token_for(email);
    let (status, body) = app.send(get("/api/preferences", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let mut favorites: Vec<String> = body["favorites"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| id.as_str().unwrap().to_string())
        .collect();
    favorites.sort();
    favorites
}

fn toggle(id: &str, token: &str) -> axum::http::Request<axum::body::Body> {
    request("POST", &format!("/api/apps/{}/favorite", id), Some(token), None)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_preferences_created_with_defaults(pool: PgPool) {
    let app = setup_db_test_app(pool.clone(), &[ADMIN]);
    let token = token_for(USER);

    let (status, first) = app.send(get("/api/preferences", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["email"], USER);
    assert_eq!(first["theme"], "dark");
    assert_eq!(first["favorites"], json!([]));

    let (status, second) = app.send(get("/api/preferences", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_preferences WHERE email = $1")
        .bind(USER)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_theme_persists(pool: PgPool) {
    let app = setup_db_test_app(pool, &[ADMIN]);
    let token = token_for(USER);

    let (status, body) = app
        .send(request(
            "PUT",
            "/api/preferences/theme",
            Some(&token),
            Some(json!({ "theme": "light" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["theme"], "light");

    let (_, body) = app.send(get("/api/preferences", Some(&token))).await;
    assert_eq!(body["theme"], "light");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_favorites_marks_catalog(pool: PgPool) {
    let app = setup_db_test_app(pool, &[ADMIN]);
    let wiki = create_app(&app, "wiki").await;
    let docs = create_app(&app, "docs").await;
    let token = token_for(USER);

    let (status, body) = app
        .send(request(
            "PUT",
            "/api/preferences/favorites",
            Some(&token),
            Some(json!({ "favorites": [docs] })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorites"], json!([docs]));

    let (status, catalog) = app.send(get("/api/apps", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let is_favorite = |id: &str| -> Value {
        catalog
            .as_array()
            .unwrap()
            .iter()
            .find(|entry| entry["id"] == id)
            .map(|entry| entry["isFavorite"].clone())
            .unwrap()
    };
    assert_eq!(is_favorite(&docs), true);
    assert_eq!(is_favorite(&wiki), false);

    // Another user's catalog is unaffected.
    let (_, other) = app.send(get("/api/apps", Some(&token_for(ADMIN)))).await;
    assert!(
        other
            .as_array()
            .unwrap()
            .iter()
            .all(|entry| entry["isFavorite"] == false)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_toggle_favorite_persists(pool: PgPool) {
    let app = setup_db_test_app(pool, &[ADMIN]);
    let wiki = create_app(&app, "wiki").await;
    let token = token_for(USER);

    let (status, body) = app.send(toggle(&wiki, &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "success", "action": "added", "isFavorite": true })
    );
    assert_eq!(favorites_of(&app, USER).await, vec![wiki.clone()]);

    let (status, body) = app.send(toggle(&wiki, &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "removed");
    assert_eq!(body["isFavorite"], false);
    assert!(favorites_of(&app, USER).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_toggles_keep_both_favorites(pool: PgPool) {
    let app = setup_db_test_app(pool, &[ADMIN]);
    let wiki = create_app(&app, "wiki").await;
    let docs = create_app(&app, "docs").await;
    let token = token_for(USER);

    let ((first, _), (second, _)) =
        tokio::join!(app.send(toggle(&wiki, &token)), app.send(toggle(&docs, &token)));
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let mut expected = vec![wiki, docs];
    expected.sort();
    assert_eq!(favorites_of(&app, USER).await, expected);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_schema_rejects_bad_theme_and_duplicate_email(pool: PgPool) {
    let bad_theme = sqlx::query("INSERT INTO user_preferences (email, theme) VALUES ($1, 'blue')")
        .bind(USER)
        .execute(&pool)
        .await;
    assert!(bad_theme.is_err());

    sqlx::query("INSERT INTO user_preferences (email) VALUES ($1)")
        .bind(USER)
        .execute(&pool)
        .await
        .unwrap();

    let duplicate = sqlx::query("INSERT INTO user_preferences (email) VALUES ($1)")
        .bind(USER)
        .execute(&pool)
        .await;
    assert!(duplicate.is_err());

    let theme: String = sqlx::query_scalar("SELECT theme FROM user_preferences WHERE email = $1")
        .bind(USER)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(theme, "dark");
}

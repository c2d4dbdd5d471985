mod common;

use std::sync::Arc;

use appdeck::middleware::auth::AuthUser;
use appdeck::middleware::role::{RequireAdmin, check_admin};
use appdeck_auth::{AdminAllowlist, AuthenticatedIdentity, RoleResolver};
use axum::extract::FromRequestParts;
use axum::http::{Request, StatusCode};
use common::{setup_test_app, token_for};

fn resolved_user(email: &str, admins: &[&str]) -> AuthUser {
    let resolver = RoleResolver::new(Arc::new(AdminAllowlist::from_emails(admins.iter().copied())));
    AuthUser(resolver.resolve(AuthenticatedIdentity::new(email, None)))
}

#[test]
fn test_check_admin_allows_allowlisted_user() {
    let auth_user = resolved_user("Admin@Example.com", &["admin@example.com"]);
    assert!(check_admin(&auth_user).is_ok());
}

#[test]
fn test_check_admin_forbids_plain_user() {
    let auth_user = resolved_user("user@example.com", &["admin@example.com"]);

    let err = check_admin(&auth_user).unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn test_check_admin_with_empty_allowlist() {
    let auth_user = resolved_user("admin@example.com", &[]);
    assert!(check_admin(&auth_user).is_err());
}

#[tokio::test]
async fn test_require_admin_extractor() {
    let app = setup_test_app(&["admin@example.com"]);

    let (mut parts, _) = Request::builder()
        .header("authorization", format!("Bearer {}", token_for("admin@example.com")))
        .body(())
        .unwrap()
        .into_parts();
    let RequireAdmin(auth_user) = RequireAdmin::from_request_parts(&mut parts, &app.state)
        .await
        .unwrap();
    assert_eq!(auth_user.email(), "admin@example.com");

    let (mut parts, _) = Request::builder()
        .header("authorization", format!("Bearer {}", token_for("user@example.com")))
        .body(())
        .unwrap()
        .into_parts();
    let err = RequireAdmin::from_request_parts(&mut parts, &app.state)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auth_user_is_cached_per_request() {
    let app = setup_test_app(&[]);

    let (mut parts, _) = Request::builder()
        .header("authorization", format!("Bearer {}", token_for("a@b.com")))
        .body(())
        .unwrap()
        .into_parts();

    let first = AuthUser::from_request_parts(&mut parts, &app.state).await.unwrap();
    assert!(parts.extensions.get::<AuthUser>().is_some());

    // Later guards reuse the cached identity instead of re-reading the header.
    parts.headers.remove("authorization");
    let second = AuthUser::from_request_parts(&mut parts, &app.state).await.unwrap();

    assert_eq!(first.identity(), second.identity());
}

#[tokio::test]
async fn test_auth_user_rejects_missing_header() {
    let app = setup_test_app(&[]);
    let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

    let err = AuthUser::from_request_parts(&mut parts, &app.state)
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
}

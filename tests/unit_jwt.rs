use appdeck_auth::{AuthError, TokenVerifier, create_access_token};
use appdeck_config::AuthConfig;

fn login_config() -> AuthConfig {
    AuthConfig::login("test_secret_key_for_testing_purposes")
}

#[test]
fn test_create_access_token_success() {
    let token = create_access_token(&login_config(), "test@example.com", None, 3600).unwrap();

    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_verify_token_success() {
    let config = login_config();
    let token = create_access_token(&config, "test@example.com", Some("Test"), 3600).unwrap();

    let identity = TokenVerifier::from_config(&config)
        .unwrap()
        .verify(&token)
        .unwrap();

    assert_eq!(identity.email(), "test@example.com");
    assert_eq!(identity.display_name(), Some("Test"));
    assert!(!identity.is_admin());
}

#[test]
fn test_verify_token_wrong_secret() {
    let token = create_access_token(&login_config(), "test@example.com", None, 3600).unwrap();

    let other = AuthConfig::login("another_secret");
    let result = TokenVerifier::from_config(&other).unwrap().verify(&token);

    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}

#[test]
fn test_verify_token_malformed() {
    let verifier = TokenVerifier::from_config(&login_config()).unwrap();

    for token in ["", "not-a-jwt", "a.b.c"] {
        assert!(verifier.verify(token).is_err(), "{:?} should be rejected", token);
    }
}

#[test]
fn test_hmac_algorithm_override_round_trip() {
    let config = login_config().with_algorithm("HS512");
    let token = create_access_token(&config, "test@example.com", None, 3600).unwrap();

    assert!(TokenVerifier::from_config(&config).unwrap().verify(&token).is_ok());

    // An HS256 verifier refuses a token signed with HS512.
    let result = TokenVerifier::from_config(&login_config()).unwrap().verify(&token);
    assert!(result.is_err());
}

#[test]
fn test_audience_mismatch_is_rejected() {
    let issued = login_config().with_audience("appdeck-web");
    let token = create_access_token(&issued, "test@example.com", None, 3600).unwrap();

    let expected = login_config().with_audience("appdeck-admin");
    let result = TokenVerifier::from_config(&expected).unwrap().verify(&token);

    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}

#[test]
fn test_unset_audience_ignores_token_audience() {
    let issued = login_config().with_audience("appdeck-web");
    let token = create_access_token(&issued, "test@example.com", None, 3600).unwrap();

    assert!(
        TokenVerifier::from_config(&login_config())
            .unwrap()
            .verify(&token)
            .is_ok()
    );
}

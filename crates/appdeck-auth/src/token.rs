//! Login-mode token minting.
//!
//! In login mode this service is its own token issuer. Tokens carry the
//! caller's `email` and optional `name`, `iat`/`exp`, and the configured
//! `iss`/`aud` so that they pass this service's own verifier.

use appdeck_config::{AuthConfig, AuthMode};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use crate::error::AuthError;
use crate::verifier::resolve_algorithm;

#[derive(Debug, Serialize)]
struct AccessTokenClaims<'a> {
    sub: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<&'a str>,
    iat: i64,
    exp: i64,
}

/// Creates a signed access token for `email`, valid for `ttl_secs` seconds.
///
/// # Errors
///
/// Returns [`AuthError::Configuration`] outside login mode, when no secret
/// is configured, when the configured algorithm is not an HMAC variant, or
/// when `ttl_secs` pushes the expiry past the representable range.
pub fn create_access_token(
    config: &AuthConfig,
    email: &str,
    name: Option<&str>,
    ttl_secs: i64,
) -> Result<String, AuthError> {
    if config.mode != AuthMode::Login {
        return Err(AuthError::Configuration(
            "tokens are issued by the identity provider in sso mode".to_string(),
        ));
    }

    let secret = config.secret.as_deref().ok_or_else(|| {
        AuthError::Configuration("JWT_SECRET is required to issue tokens".to_string())
    })?;
    let algorithm = resolve_algorithm(config.mode, config.algorithm.as_deref())?;

    let now = Utc::now().timestamp();
    let exp = now.checked_add(ttl_secs).ok_or_else(|| {
        AuthError::Configuration(format!("token lifetime of {}s is out of range", ttl_secs))
    })?;
    let claims = AccessTokenClaims {
        sub: email,
        email,
        name,
        iss: config.issuer.as_deref(),
        aud: config.audience.as_deref(),
        iat: now,
        exp,
    };

    encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Configuration(format!("failed to create token: {}", e)))
}

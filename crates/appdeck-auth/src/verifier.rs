//! Bearer token verification.
//!
//! Two modes are supported:
//!
//! - **login**: tokens minted by this service, signed with a shared HMAC
//!   secret. HS256 unless `JWT_ALGORITHM` picks another HMAC variant.
//! - **sso**: tokens minted by an external identity provider, verified with
//!   its PEM public key read once at startup. RS256 unless overridden.
//!
//! Issuer and audience are asserted only when configured. When they are not
//! configured the corresponding check is skipped entirely.

use std::fmt;
use std::path::Path;

use appdeck_config::{AuthConfig, AuthMode};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::identity::AuthenticatedIdentity;

/// The claims this service reads. Registered claims (`exp`, `nbf`, `iss`,
/// `aud`) are checked by [`Validation`] and not needed here.
#[derive(Debug, Deserialize)]
struct IdentityClaims {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

pub struct TokenVerifier {
    mode: AuthMode,
    algorithm: Algorithm,
    key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("mode", &self.mode)
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.validation.iss)
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Builds a verifier, loading key material for the configured mode.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] when the mode's key material is
    /// missing or unreadable, or the algorithm is unknown or does not fit the
    /// mode.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let algorithm = resolve_algorithm(config.mode, config.algorithm.as_deref())?;

        let key = match config.mode {
            AuthMode::Login => {
                let secret = config.secret.as_deref().ok_or_else(|| {
                    AuthError::Configuration(
                        "JWT_SECRET is required when AUTH_MODE is login".to_string(),
                    )
                })?;
                DecodingKey::from_secret(secret.as_bytes())
            }
            AuthMode::Sso => {
                let path = config.public_key_path.as_deref().ok_or_else(|| {
                    AuthError::Configuration(
                        "JWT_PUBLIC_KEY_PATH is required when AUTH_MODE is sso".to_string(),
                    )
                })?;
                load_public_key(path, algorithm)?
            }
        };

        let validation = build_validation(
            algorithm,
            config.issuer.as_deref(),
            config.audience.as_deref(),
        );

        info!(
            mode = %config.mode,
            algorithm = ?algorithm,
            issuer = config.issuer.as_deref().unwrap_or("-"),
            audience = config.audience.as_deref().unwrap_or("-"),
            "Token verifier initialized"
        );

        Ok(Self {
            mode: config.mode,
            algorithm,
            key,
            validation,
        })
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Verifies `token` and extracts the identity it carries.
    ///
    /// The returned identity holds only the `user` role; admin elevation is
    /// the resolver's job.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is malformed, the
    /// signature or algorithm does not match, a present `exp`/`nbf` is out of
    /// range, a configured issuer/audience does not match, or the `email`
    /// claim is missing or blank.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        let data = decode::<IdentityClaims>(token, &self.key, &self.validation).map_err(|e| {
            warn!(mode = %self.mode, error = %e, "JWT verification failed");
            AuthError::InvalidToken(e.to_string())
        })?;

        let claims = data.claims;
        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| {
                warn!(mode = %self.mode, "JWT verification failed: token missing email claim");
                AuthError::InvalidToken("token missing email claim".to_string())
            })?;

        Ok(AuthenticatedIdentity::new(email, claims.name))
    }
}

/// Picks the signing algorithm for `mode`, honoring an override.
pub(crate) fn resolve_algorithm(
    mode: AuthMode,
    requested: Option<&str>,
) -> Result<Algorithm, AuthError> {
    let algorithm = match requested {
        Some(name) => parse_algorithm(name)?,
        None => match mode {
            AuthMode::Login => Algorithm::HS256,
            AuthMode::Sso => Algorithm::RS256,
        },
    };

    let is_hmac = matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    );

    match (mode, is_hmac) {
        (AuthMode::Login, false) => Err(AuthError::Configuration(format!(
            "algorithm {:?} needs a public key; login mode only supports HS256, HS384 and HS512",
            algorithm
        ))),
        (AuthMode::Sso, true) => Err(AuthError::Configuration(format!(
            "algorithm {:?} is symmetric and cannot be verified with a public key in sso mode",
            algorithm
        ))),
        _ => Ok(algorithm),
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, AuthError> {
    let algorithm = match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Algorithm::HS256,
        "HS384" => Algorithm::HS384,
        "HS512" => Algorithm::HS512,
        "RS256" => Algorithm::RS256,
        "RS384" => Algorithm::RS384,
        "RS512" => Algorithm::RS512,
        "PS256" => Algorithm::PS256,
        "PS384" => Algorithm::PS384,
        "PS512" => Algorithm::PS512,
        "ES256" => Algorithm::ES256,
        "ES384" => Algorithm::ES384,
        "EDDSA" => Algorithm::EdDSA,
        _ => {
            return Err(AuthError::Configuration(format!(
                "unsupported JWT_ALGORITHM '{}'",
                name
            )));
        }
    };

    Ok(algorithm)
}

fn load_public_key(path: &Path, algorithm: Algorithm) -> Result<DecodingKey, AuthError> {
    let pem = std::fs::read(path).map_err(|e| {
        AuthError::Configuration(format!(
            "failed to read public key from {}: {}",
            path.display(),
            e
        ))
    })?;

    let key = match algorithm {
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(&pem),
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(&pem),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(&pem),
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Err(AuthError::Configuration(
                "HMAC algorithms do not use a public key".to_string(),
            ));
        }
    };

    key.map_err(|e| {
        AuthError::Configuration(format!(
            "public key at {} is not a valid {:?} key: {}",
            path.display(),
            algorithm,
            e
        ))
    })
}

fn build_validation(
    algorithm: Algorithm,
    issuer: Option<&str>,
    audience: Option<&str>,
) -> Validation {
    let mut validation = Validation::new(algorithm);
    // exp/nbf are checked when present but not demanded
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.validate_nbf = true;

    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
        validation.required_spec_claims.insert("iss".to_string());
    }

    match audience {
        Some(audience) => {
            validation.set_audience(&[audience]);
            validation.required_spec_claims.insert("aud".to_string());
        }
        None => validation.validate_aud = false,
    }

    validation
}

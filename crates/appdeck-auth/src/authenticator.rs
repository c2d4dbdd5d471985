//! The verify → resolve pipeline and the admin gate.

use std::sync::Arc;

use appdeck_config::AuthMode;
use tracing::warn;

use crate::error::AuthError;
use crate::identity::AuthenticatedIdentity;
use crate::resolver::RoleResolver;
use crate::verifier::TokenVerifier;

/// Turns a bearer token into a resolved identity.
#[derive(Clone, Debug)]
pub struct Authenticator {
    verifier: Arc<TokenVerifier>,
    resolver: RoleResolver,
}

impl Authenticator {
    pub fn new(verifier: Arc<TokenVerifier>, resolver: RoleResolver) -> Self {
        Self { verifier, resolver }
    }

    pub fn mode(&self) -> AuthMode {
        self.verifier.mode()
    }

    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    /// Verifies `token` and resolves the identity's roles.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        let identity = self.verifier.verify(token)?;
        Ok(self.resolver.resolve(identity))
    }
}

/// Passes admins through; anyone else gets [`AuthError::Forbidden`].
pub fn require_admin(identity: &AuthenticatedIdentity) -> Result<(), AuthError> {
    if identity.is_admin() {
        return Ok(());
    }

    warn!(email = %identity.email(), "Admin access attempt by non-admin user");
    Err(AuthError::Forbidden(
        "Administrator privileges required".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowlist::AdminAllowlist;
    use crate::identity::Role;
    use appdeck_config::AuthConfig;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn authenticator(admins: &[&str]) -> Authenticator {
        let verifier = TokenVerifier::from_config(&AuthConfig::login("s3cret")).unwrap();
        let allowlist = AdminAllowlist::from_emails(admins.iter().copied());
        Authenticator::new(Arc::new(verifier), RoleResolver::new(Arc::new(allowlist)))
    }

    fn token_for(email: &str) -> String {
        encode(
            &Header::default(),
            &json!({ "email": email }),
            &EncodingKey::from_secret(b"s3cret"),
        )
        .unwrap()
    }

    #[test]
    fn test_authenticate_plain_user() {
        let identity = authenticator(&[]).authenticate(&token_for("a@b.com")).unwrap();

        assert_eq!(identity.email(), "a@b.com");
        assert!(!identity.is_admin());
        assert!(require_admin(&identity).is_err());
    }

    #[test]
    fn test_authenticate_allowlisted_admin() {
        let identity = authenticator(&["a@b.com"])
            .authenticate(&token_for("a@b.com"))
            .unwrap();

        assert!(identity.has_role(Role::Admin));
        assert!(require_admin(&identity).is_ok());
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let result = authenticator(&["a@b.com"]).authenticate("garbage");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_require_admin_is_forbidden_not_unauthenticated() {
        let identity = AuthenticatedIdentity::new("x@y.com", None);
        let err = require_admin(&identity).unwrap_err();

        assert!(matches!(err, AuthError::Forbidden(_)));
        assert!(!err.is_unauthenticated());
    }

    #[test]
    fn test_mode_comes_from_verifier() {
        assert_eq!(authenticator(&[]).mode(), AuthMode::Login);
    }
}

//! Admin role resolution.

use std::sync::Arc;

use tracing::debug;

use crate::allowlist::AdminAllowlist;
use crate::identity::{AuthenticatedIdentity, Role};

/// Elevates verified identities listed in the [`AdminAllowlist`].
#[derive(Clone, Debug)]
pub struct RoleResolver {
    allowlist: Arc<AdminAllowlist>,
}

impl RoleResolver {
    pub fn new(allowlist: Arc<AdminAllowlist>) -> Self {
        Self { allowlist }
    }

    pub fn allowlist(&self) -> &Arc<AdminAllowlist> {
        &self.allowlist
    }

    /// Adds [`Role::Admin`] when the identity's email is allowlisted.
    ///
    /// Idempotent and infallible: identities not on the list come back
    /// unchanged.
    pub fn resolve(&self, identity: AuthenticatedIdentity) -> AuthenticatedIdentity {
        if self.allowlist.contains(identity.email()) {
            debug!(email = %identity.email(), "Resolved admin role");
            identity.with_role(Role::Admin)
        } else {
            identity
        }
    }
}

//! # AppDeck Auth
//!
//! The authentication core of the AppDeck API.
//!
//! A request's bearer token flows through three stages:
//!
//! ```text
//! token ──► TokenVerifier::verify ──► RoleResolver::resolve ──► require_admin (optional)
//!              │ InvalidToken              │ never fails            │ Forbidden
//! ```
//!
//! - [`verifier`]: Signature, algorithm, issuer and audience checks for both
//!   auth modes, producing an [`AuthenticatedIdentity`]
//! - [`allowlist`]: The admin email allowlist, loaded from a JSON file and
//!   reloadable with an atomic swap
//! - [`resolver`]: Elevates identities found in the allowlist to admin
//! - [`authenticator`]: Verifier and resolver combined, plus the admin gate
//! - [`token`]: Login-mode token minting
//!
//! Nothing in this crate knows about HTTP; the server maps [`AuthError`]
//! variants onto status codes.

pub mod allowlist;
pub mod authenticator;
pub mod error;
pub mod identity;
pub mod resolver;
pub mod token;
pub mod verifier;

pub use allowlist::{AdminAllowlist, normalize_email};
pub use authenticator::{Authenticator, require_admin};
pub use error::AuthError;
pub use identity::{AuthenticatedIdentity, Role};
pub use resolver::RoleResolver;
pub use token::create_access_token;
pub use verifier::TokenVerifier;

//! Authentication and authorization for route handlers.
//!
//! - [`auth`]: The [`AuthUser`](auth::AuthUser) extractor. Reads
//!   `Authorization: Bearer <token>`, runs verify then resolve, and caches
//!   the resolved identity in the request extensions
//! - [`role`]: The admin gate, as route middleware, as an extractor and as a
//!   plain check for handler code
//!
//! # Request flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the token and resolves roles (401 on failure)
//! 3. `require_admin` / `RequireAdmin` reject non-admins (403)
//! 4. The handler runs with an immutable identity
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireAdmin;
//!
//! async fn me(auth_user: AuthUser) -> impl IntoResponse {
//!     auth_user.email().to_string()
//! }
//!
//! async fn admin_only(RequireAdmin(auth_user): RequireAdmin) -> impl IntoResponse {
//!     // Only executes for allowlisted admins
//! }
//! ```

pub mod auth;
pub mod role;

//! Request authentication and authorization.
//!
//! - [`auth`]: `AuthUser` / `AdminUser` extractors that resolve the bearer
//!   token to a current [`User`](snippets_models::User) once per request
//! - [`role`]: pure authorization predicates and the guards built on them
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AdminUser, AuthUser};
//! use crate::middleware::role::ensure_can_delete_note;
//!
//! // Any authenticated user
//! async fn me(AuthUser(user): AuthUser) -> Json<User> { Json(user) }
//!
//! // Admins only; everyone else gets 403
//! async fn create_course(AdminUser(admin): AdminUser, ...) { ... }
//!
//! // Ownership checks happen in services against the loaded resource
//! ensure_can_delete_note(&user, &note)?;
//! ```

pub mod auth;
pub mod role;

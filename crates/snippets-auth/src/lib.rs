//! # Snippets Auth
//!
//! Stateless access tokens for the Study Snippets API.
//!
//! - [`claims`]: the JWT claim set (`sub`, `iat`, `exp`)
//! - [`jwt`]: token creation and verification
//!
//! Tokens carry nothing but the user id and their validity window. Role
//! checks always read the current user row, so promoting or demoting an
//! admin takes effect on the next request.
//!
//! # Example
//!
//! ```ignore
//! use snippets_auth::{create_access_token, verify_token};
//! use snippets_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user_id, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, create_access_token_with_ttl, verify_token};

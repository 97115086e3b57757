//! Authentication models, re-exported from the shared `snippets-models` crate.

pub use snippets_models::auth::*;
pub use snippets_models::users::{RegisterRequestDto, User};

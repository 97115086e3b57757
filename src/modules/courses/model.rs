//! Course models, re-exported from the shared `snippets-models` crate.

pub use snippets_models::courses::*;

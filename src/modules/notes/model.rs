pub use snippets_models::notes::*;

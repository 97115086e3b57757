//! # Snippets CLI
//!
//! Administration and database seeding for Study Snippets.
//!
//! Admin accounts cannot be created through the HTTP API; [`admin`] is the
//! only way to create one or to change a user's admin flag.
//!
//! ## Usage
//!
//! ```ignore
//! use snippets_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(20).with_notes_per_course(8);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;

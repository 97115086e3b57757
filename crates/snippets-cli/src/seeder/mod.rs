//! Fake data for development databases.
//!
//! Generation runs on the rayon pool; inserts use multi-row `INSERT`
//! statements inside one transaction per table.

pub mod courses;
pub mod models;
pub mod notes;
pub mod users;

use snippets_core::hash_password;
use sqlx::PgPool;
use std::time::Instant;

pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig};

/// What a seed run inserted.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub users: usize,
    pub courses: usize,
    pub notes: u64,
}

/// Seeds a seed admin, uploaders, courses owned by the admin and notes spread
/// across the uploaders.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let password_hash = hash_password(SEED_PASSWORD)
        .map_err(|e| anyhow::anyhow!("Failed to hash seed password: {}", e.message()))?;

    let admins = users::generate_users(1, true, "admin");
    let admin_ids = users::seed_users(db, &admins, &password_hash).await?;
    let Some(&admin_id) = admin_ids.first() else {
        anyhow::bail!("Generated seed admin email is already taken, run seed again");
    };

    let uploaders = users::generate_users(config.num_uploaders, false, "student");
    let uploader_ids = users::seed_users(db, &uploaders, &password_hash).await?;

    let course_seeds = courses::generate_courses(config.num_courses, admin_id);
    let course_ids = courses::seed_courses(db, &course_seeds).await?;

    let note_seeds = notes::generate_notes(&course_ids, &uploader_ids, config.notes_per_course);
    let note_count = notes::seed_notes(db, &note_seeds).await?;

    let summary = SeedSummary {
        users: admin_ids.len() + uploader_ids.len(),
        courses: course_ids.len(),
        notes: note_count,
    };

    println!(
        "\n✅ Seeded {} users, {} courses and {} notes in {:?}",
        summary.users,
        summary.courses,
        summary.notes,
        start_time.elapsed()
    );
    println!("   Seed users log in with password: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Removes all seeded data.
pub async fn clear_all(db: &PgPool) -> anyhow::Result<u64> {
    let deleted = users::clear_users(db).await?;
    println!("\n✅ Seeded users removed along with their courses and notes");
    Ok(deleted)
}

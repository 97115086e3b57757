//! Seed users: one admin who owns the generated courses, plus students who
//! upload the generated notes.

use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use snippets_models::UserId;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

pub fn generate_users(count: usize, is_admin: bool, prefix: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let university: String = CompanyName().fake();

            UserSeed {
                email: format!(
                    "{}.{}+{}{}@{}",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    prefix,
                    idx,
                    SEED_EMAIL_DOMAIN
                ),
                first_name,
                last_name,
                university: Some(format!("{} University", university)),
                is_admin,
            }
        })
        .collect()
}

/// Seeds users that all share `password_hash`.
pub async fn seed_users(
    db: &PgPool,
    users: &[UserSeed],
    password_hash: &str,
) -> anyhow::Result<Vec<UserId>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", users.len());

    let mut tx = db.begin().await?;

    // 6 params per user
    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk, password_hash).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
    password_hash: &str,
) -> anyhow::Result<Vec<UserId>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO users (email, hashed_password, first_name, last_name, university, is_admin) VALUES ",
    );

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 6;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6
        ));
    }

    // Re-running the seeder may regenerate an existing email
    query.push_str(" ON CONFLICT (email) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.email)
            .bind(password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.university)
            .bind(user.is_admin);
    }

    let ids: Vec<UserId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes every generated user. Their courses and notes cascade.
pub async fn clear_users(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

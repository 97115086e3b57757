//! Course seeding.

use fake::Fake;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use rayon::prelude::*;
use snippets_models::{CourseId, UserId};
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::CourseSeed;

const DEPARTMENTS: &[(&str, &str)] = &[
    ("CS", "Computer Science"),
    ("MATH", "Mathematics"),
    ("PHYS", "Physics"),
    ("CHEM", "Chemistry"),
    ("BIO", "Biology"),
    ("ECON", "Economics"),
    ("HIST", "History"),
    ("PHIL", "Philosophy"),
];

/// Generates courses spread across departments. Codes are unique within one
/// call.
pub fn generate_courses(count: usize, created_by: UserId) -> Vec<CourseSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let (prefix, department) = DEPARTMENTS[idx % DEPARTMENTS.len()];
            let topic: String = Buzzword().fake();
            let subtitle: String = CatchPhrase().fake();

            CourseSeed {
                course_code: format!("{}{}", prefix, 100 + idx),
                course_name: format!("{} {}", capitalize(&topic), subtitle),
                department: department.to_string(),
                created_by,
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn seed_courses(db: &PgPool, courses: &[CourseSeed]) -> anyhow::Result<Vec<CourseId>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} courses...", courses.len());

    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(courses.len());

    for chunk in courses.chunks(BATCH_SIZE) {
        all_ids.extend(insert_courses_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_courses_chunk(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> anyhow::Result<Vec<CourseId>> {
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO courses (course_code, course_name, department, created_by) VALUES ",
    );

    for i in 0..courses.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 4;
        query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
    }

    // Codes from an earlier seed run are skipped
    query.push_str(" ON CONFLICT (course_code) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for course in courses {
        q = q
            .bind(&course.course_code)
            .bind(&course.course_name)
            .bind(&course.department)
            .bind(course.created_by);
    }

    let ids: Vec<CourseId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

//! Note seeding.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use rayon::prelude::*;
use snippets_models::{CourseId, FileType, UserId};
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::NoteSeed;

const FILE_TYPES: &[FileType] = &[
    FileType::Pdf,
    FileType::Image,
    FileType::Png,
    FileType::Jpg,
    FileType::Jpeg,
];

fn extension(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Pdf => "pdf",
        FileType::Image | FileType::Png => "png",
        FileType::Jpg => "jpg",
        FileType::Jpeg => "jpeg",
    }
}

/// Generates `notes_per_course` notes for every course, rotating uploaders.
pub fn generate_notes(
    course_ids: &[CourseId],
    uploader_ids: &[UserId],
    notes_per_course: usize,
) -> Vec<NoteSeed> {
    if uploader_ids.is_empty() {
        return Vec::new();
    }

    course_ids
        .par_iter()
        .enumerate()
        .flat_map(|(course_idx, &course_id)| {
            (0..notes_per_course)
                .map(|note_idx| {
                    let uploader =
                        uploader_ids[(course_idx * notes_per_course + note_idx) % uploader_ids.len()];
                    let file_type = FILE_TYPES[(0..FILE_TYPES.len()).fake::<usize>()];
                    let slug: String = Word().fake();
                    let title: String = Sentence(2..6).fake();
                    let description = if (0..4).fake::<u8>() == 0 {
                        None
                    } else {
                        Some(Paragraph(1..3).fake::<String>())
                    };

                    NoteSeed {
                        title: title.trim_end_matches('.').to_string(),
                        description,
                        file_url: format!(
                            "https://files.example.com/{}/{}-{}.{}",
                            course_id,
                            slug,
                            note_idx,
                            extension(file_type)
                        ),
                        file_type,
                        course_id,
                        uploaded_by: uploader,
                        upvotes_count: (0..250).fake::<i32>(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_notes(db: &PgPool, notes: &[NoteSeed]) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("📝 Seeding {} notes...", notes.len());

    let mut tx = db.begin().await?;

    // 7 params per note
    const BATCH_SIZE: usize = 1000;
    let mut inserted = 0;

    for chunk in notes.chunks(BATCH_SIZE) {
        inserted += insert_notes_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} notes in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_notes_chunk(
    tx: &mut Transaction<'_, Postgres>,
    notes: &[NoteSeed],
) -> anyhow::Result<u64> {
    if notes.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO notes (title, description, file_url, file_type, course_id, uploaded_by, upvotes_count) VALUES ",
    );

    for i in 0..notes.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 7;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7
        ));
    }

    let mut q = sqlx::query(&query);
    for note in notes {
        q = q
            .bind(&note.title)
            .bind(&note.description)
            .bind(&note.file_url)
            .bind(note.file_type)
            .bind(note.course_id)
            .bind(note.uploaded_by)
            .bind(note.upvotes_count);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}

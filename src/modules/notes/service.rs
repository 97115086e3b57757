use snippets_core::{AppError, PaginationMeta};
use snippets_db::contains_pattern;
use snippets_models::{CourseId, NoteId, User};
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::metrics;
use crate::middleware::role::{ensure_can_delete_note, ensure_can_edit_note};

use super::model::{
    CreateNoteDto, Note, NoteFilterParams, NoteSort, NoteWithUploader, PaginatedNotesResponse,
    UpdateNoteDto,
};

const NOTE_COLUMNS: &str = "id, title, description, file_url, file_type, course_id, uploaded_by, \
     upvotes_count, created_at, updated_at";

const NOTE_WITH_UPLOADER_COLUMNS: &str = "n.id, n.title, n.description, n.file_url, n.file_type, \
     n.course_id, n.uploaded_by, n.created_at, n.updated_at, \
     u.first_name || ' ' || u.last_name AS uploader_name, \
     u.email AS uploader_email";

fn note_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Note not found"))
}

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found"))
}

fn map_foreign_key_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        warn!("Note insert referenced a course that no longer exists");
        return course_not_found();
    }
    AppError::from(e)
}

fn order_by(sort: NoteSort) -> &'static str {
    match sort {
        NoteSort::Recent => "n.created_at DESC, n.id",
        NoteSort::Popular => "n.upvotes_count DESC, n.created_at DESC, n.id",
    }
}

pub struct NoteService;

impl NoteService {
    #[instrument(skip(db, requester, dto), fields(user.id = %requester.id, course.id = %dto.course_id, db.operation = "INSERT", db.table = "notes"))]
    pub async fn create_note(
        db: &PgPool,
        requester: &User,
        dto: CreateNoteDto,
    ) -> Result<Note, AppError> {
        let mut tx = db.begin().await?;

        // Shared row lock holds off a concurrent course delete until the insert commits
        let course = sqlx::query_scalar::<_, CourseId>(
            "SELECT id FROM courses WHERE id = $1 FOR SHARE",
        )
        .bind(dto.course_id)
        .fetch_optional(&mut *tx)
        .await?;

        if course.is_none() {
            debug!(course.id = %dto.course_id, "Note upload targets a missing course");
            return Err(course_not_found());
        }

        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (title, description, file_url, file_type, course_id, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.file_url)
        .bind(dto.file_type)
        .bind(dto.course_id)
        .bind(requester.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_foreign_key_violation)?;

        tx.commit().await?;

        metrics::track_note_uploaded();
        info!(note.id = %note.id, course.id = %note.course_id, "Note uploaded");

        Ok(note)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "notes"))]
    pub async fn get_notes(
        db: &PgPool,
        filters: NoteFilterParams,
    ) -> Result<PaginatedNotesResponse, AppError> {
        let limit = filters.limit();
        let skip = filters.skip();

        debug!(
            limit,
            skip,
            filter.course_id = ?filters.course_id,
            filter.search = ?filters.search,
            sort_by = ?filters.sort_by,
            "Fetching notes"
        );

        let mut where_clause = String::from(" WHERE 1=1");
        let mut course_param = None;
        let mut search_param = None;
        let mut param_count = 0;

        if let Some(course_id) = filters.course_id {
            param_count += 1;
            where_clause.push_str(&format!(" AND n.course_id = ${param_count}"));
            course_param = Some(course_id);
        }

        if let Some(search) = &filters.search {
            param_count += 1;
            where_clause.push_str(&format!(" AND n.title ILIKE ${param_count}"));
            search_param = Some(contains_pattern(search));
        }

        let count_query = format!("SELECT COUNT(*) FROM notes n{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(course_id) = course_param {
            count_sql = count_sql.bind(course_id);
        }
        if let Some(pattern) = &search_param {
            count_sql = count_sql.bind(pattern);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {NOTE_WITH_UPLOADER_COLUMNS}
             FROM notes n
             JOIN users u ON u.id = n.uploaded_by{where_clause}
             ORDER BY {}
             LIMIT {limit} OFFSET {skip}",
            order_by(filters.sort_by)
        );
        let mut data_sql = sqlx::query_as::<_, NoteWithUploader>(&data_query);
        if let Some(course_id) = course_param {
            data_sql = data_sql.bind(course_id);
        }
        if let Some(pattern) = &search_param {
            data_sql = data_sql.bind(pattern);
        }
        let notes = data_sql.fetch_all(db).await?;

        debug!(total, returned = notes.len(), "Notes fetched");

        Ok(PaginatedNotesResponse {
            data: notes,
            meta: PaginationMeta::new(total, limit, skip),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "notes"))]
    pub async fn get_note(db: &PgPool, note_id: NoteId) -> Result<NoteWithUploader, AppError> {
        sqlx::query_as::<_, NoteWithUploader>(&format!(
            "SELECT {NOTE_WITH_UPLOADER_COLUMNS}
             FROM notes n
             JOIN users u ON u.id = n.uploaded_by
             WHERE n.id = $1"
        ))
        .bind(note_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(note_not_found)
    }

    #[instrument(skip(db, requester, dto), fields(user.id = %requester.id, db.operation = "UPDATE", db.table = "notes"))]
    pub async fn update_note(
        db: &PgPool,
        requester: &User,
        note_id: NoteId,
        dto: UpdateNoteDto,
    ) -> Result<Note, AppError> {
        let mut tx = db.begin().await?;

        let existing = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 FOR UPDATE"
        ))
        .bind(note_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(note_not_found)?;

        ensure_can_edit_note(requester, &existing)?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.unwrap_or(existing.description);
        let file_url = dto.file_url.unwrap_or(existing.file_url);
        let file_type = dto.file_type.unwrap_or(existing.file_type);

        let note = sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes
             SET title = $1, description = $2, file_url = $3, file_type = $4, updated_at = NOW()
             WHERE id = $5
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(&title)
        .bind(&description)
        .bind(&file_url)
        .bind(file_type)
        .bind(note_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(note.id = %note.id, "Note updated");

        Ok(note)
    }

    #[instrument(skip(db, requester), fields(user.id = %requester.id, db.operation = "DELETE", db.table = "notes"))]
    pub async fn delete_note(
        db: &PgPool,
        requester: &User,
        note_id: NoteId,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let existing = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 FOR UPDATE"
        ))
        .bind(note_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(note_not_found)?;

        ensure_can_delete_note(requester, &existing)?;

        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(note_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(note.id = %note_id, by_admin = requester.id != existing.uploaded_by, "Note deleted");

        Ok(())
    }
}

//! Note entity, uploader-enriched view, DTOs and listing filters.
//!
//! Notes reference an uploaded file by URL; the API never touches file
//! content. Listing and single-note reads return [`NoteWithUploader`], which
//! joins the uploader's display name and email. Create and update return the
//! plain [`Note`] row, including `upvotes_count`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use snippets_core::PaginationMeta;
use snippets_core::serde::{
    deserialize_optional_i64, deserialize_optional_string, deserialize_optional_uuid,
};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::ids::{CourseId, NoteId, UserId};

pub const DEFAULT_NOTE_LIMIT: i64 = 50;
pub const MAX_NOTE_LIMIT: i64 = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "file_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
    Png,
    Jpg,
    Jpeg,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq, ToSchema)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_type: FileType,
    pub course_id: CourseId,
    pub uploaded_by: UserId,
    pub upvotes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq, ToSchema)]
pub struct NoteWithUploader {
    pub id: NoteId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_type: FileType,
    pub course_id: CourseId,
    pub uploaded_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Uploader's first and last name
    pub uploader_name: String,
    pub uploader_email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNoteDto {
    #[validate(length(min = 3, max = 200))]
    #[schema(example = "Week 3 lecture notes")]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "file_url must not be empty"))]
    #[schema(example = "https://files.example.com/cs101/week3.pdf")]
    pub file_url: String,
    pub file_type: FileType,
    pub course_id: CourseId,
}

/// Partial note update.
///
/// `description` distinguishes an omitted key (keep the stored value) from an
/// explicit `null` (clear it).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_description"))]
pub struct UpdateNoteDto {
    #[validate(length(min = 3, max = 200))]
    pub title: Option<String>,
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, message = "file_url must not be empty"))]
    pub file_url: Option<String>,
    pub file_type: Option<FileType>,
}

fn validate_update_description(dto: &UpdateNoteDto) -> Result<(), ValidationError> {
    match &dto.description {
        Some(Some(description)) if description.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(ValidationError::new("length")
                .with_message("description must be at most 1000 characters".into()))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoteSort {
    /// Newest first
    #[default]
    Recent,
    /// Most upvoted first, newest first among ties
    Popular,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NoteFilterParams {
    /// Only notes of this course
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course_id: Option<Uuid>,
    /// Case-insensitive substring match on title
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default)]
    #[param(inline)]
    pub sort_by: NoteSort,
    /// Rows to skip (default 0)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: Option<i64>,
    /// Page size (1-50, default 50)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

impl NoteFilterParams {
    #[must_use]
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_NOTE_LIMIT)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedNotesResponse {
    pub data: Vec<NoteWithUploader>,
    pub meta: PaginationMeta,
}

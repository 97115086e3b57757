use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use snippets_core::AppError;
use snippets_core::errors::ErrorResponse;
use snippets_models::NoteId;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

use super::model::{
    CreateNoteDto, Note, NoteFilterParams, NoteWithUploader, PaginatedNotesResponse,
    UpdateNoteDto,
};
use super::service::NoteService;

/// Upload a note to an existing course
#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteDto,
    responses(
        (status = 201, description = "Note uploaded successfully", body = Note),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto))]
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNoteDto>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let note = NoteService::create_note(&state.db, &user, dto).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    get,
    path = "/api/notes",
    params(NoteFilterParams),
    responses(
        (status = 200, description = "Paginated list of notes", body = PaginatedNotesResponse),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse),
        (status = 422, description = "Pagination out of range", body = ErrorResponse)
    ),
    tag = "Notes"
)]
#[instrument(skip(state))]
pub async fn get_notes(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<NoteFilterParams>,
) -> Result<Json<PaginatedNotesResponse>, AppError> {
    let notes = NoteService::get_notes(&state.db, filters).await?;
    Ok(Json(notes))
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note with uploader details", body = NoteWithUploader),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "Notes"
)]
#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
) -> Result<Json<NoteWithUploader>, AppError> {
    let note = NoteService::get_note(&state.db, id).await?;
    Ok(Json(note))
}

/// Update a note; only its uploader may do this
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    request_body = UpdateNoteDto,
    responses(
        (status = 200, description = "Note updated successfully", body = Note),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the note's uploader", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto))]
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<NoteId>,
    ValidatedJson(dto): ValidatedJson<UpdateNoteDto>,
) -> Result<Json<Note>, AppError> {
    let note = NoteService::update_note(&state.db, &user, id, dto).await?;
    Ok(Json(note))
}

/// Delete a note; allowed for its uploader and for admins
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Neither uploader nor admin", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user))]
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<NoteId>,
) -> Result<StatusCode, AppError> {
    NoteService::delete_note(&state.db, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Authorization policies.
//!
//! Each policy is a pure predicate over the requesting user and, where it
//! applies, the resource being touched. The `ensure_*` guards turn a failed
//! predicate into `403 Forbidden` and log the denial.
//!
//! | Action              | Allowed for            |
//! |---------------------|------------------------|
//! | create/update/delete course | admins         |
//! | create note         | any authenticated user |
//! | update note         | the note's uploader    |
//! | delete note         | the uploader or admins |

use snippets_core::AppError;
use snippets_models::{Note, User};
use tracing::warn;

pub fn is_admin(user: &User) -> bool {
    user.is_admin
}

pub fn is_note_uploader(user: &User, note: &Note) -> bool {
    note.uploaded_by == user.id
}

/// Only the uploader may edit a note; admins get no override.
pub fn can_edit_note(user: &User, note: &Note) -> bool {
    is_note_uploader(user, note)
}

pub fn can_delete_note(user: &User, note: &Note) -> bool {
    is_note_uploader(user, note) || is_admin(user)
}

pub fn ensure_admin(user: &User) -> Result<(), AppError> {
    if is_admin(user) {
        return Ok(());
    }
    warn!(user.id = %user.id, "Non-admin attempted an admin-only operation");
    Err(AppError::forbidden("Admin privileges required"))
}

pub fn ensure_can_edit_note(user: &User, note: &Note) -> Result<(), AppError> {
    if can_edit_note(user, note) {
        return Ok(());
    }
    warn!(user.id = %user.id, note.id = %note.id, "Edit of another user's note denied");
    Err(AppError::forbidden("You can only edit your own notes"))
}

pub fn ensure_can_delete_note(user: &User, note: &Note) -> Result<(), AppError> {
    if can_delete_note(user, note) {
        return Ok(());
    }
    warn!(user.id = %user.id, note.id = %note.id, "Delete of another user's note denied");
    Err(AppError::forbidden("You can only delete your own notes"))
}

use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_note, delete_note, get_note, get_notes, update_note};

pub fn init_notes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_notes).post(create_note))
        .route("/{id}", get(get_note).put(update_note).delete(delete_note))
}

//! Note CRUD handlers.
//!
//! Authorization happens here, before the service call: read and edit
//! require access (owner or collaborator), delete requires strict
//! ownership. A collaborator may read and modify a shared note but never
//! destroy it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use noteshare_core::note::{Note, NoteWithOwner};

use crate::{
    handlers::{AppError, CurrentUser},
    models::{CreateNote, CreatedNote, UpdateNote},
    state::AppState,
};

/// Create a new note (POST /api/notes).
pub async fn create_note(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateNote>,
) -> Result<impl IntoResponse, AppError> {
    let note_id = state
        .notes
        .add_note(payload.title, payload.body, payload.tags, user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedNote { note_id })))
}

/// List the caller's visible notes (GET /api/notes).
pub async fn list_notes(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state.notes.get_notes(user_id).await?;
    Ok(Json(notes))
}

/// Get a single note (GET /api/notes/{id}).
pub async fn get_note(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteWithOwner>, AppError> {
    state.access.verify_access(id, user_id).await?;

    let note = state.notes.get_note(id).await?;
    Ok(Json(note))
}

/// Update a note (PUT /api/notes/{id}).
pub async fn update_note(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNote>,
) -> Result<StatusCode, AppError> {
    state.access.verify_access(id, user_id).await?;

    state.notes.edit_note(id, &payload.into_changes()).await?;
    Ok(StatusCode::OK)
}

/// Delete a note (DELETE /api/notes/{id}). Owner-only.
pub async fn delete_note(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.access.verify_owner(id, user_id).await?;

    state.notes.delete_note(id).await?;
    Ok(StatusCode::OK)
}

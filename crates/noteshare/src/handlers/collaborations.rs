//! Collaboration handlers.
//!
//! Only a note's owner may grant or revoke shared access to it.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    handlers::{AppError, CurrentUser},
    models::{CollaborationRequest, CreatedCollaboration},
    state::AppState,
};

/// Grant a user access to a note (POST /api/collaborations).
pub async fn create_collaboration(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<CollaborationRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.access.verify_owner(payload.note_id, user_id).await?;

    let collaboration_id = state
        .collaborations
        .add_collaboration(payload.note_id, payload.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedCollaboration { collaboration_id }),
    ))
}

/// Revoke a user's access to a note (DELETE /api/collaborations).
pub async fn delete_collaboration(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<CollaborationRequest>,
) -> Result<StatusCode, AppError> {
    state.access.verify_owner(payload.note_id, user_id).await?;

    state
        .collaborations
        .remove_collaboration(payload.note_id, payload.user_id)
        .await?;

    Ok(StatusCode::OK)
}

//! User registration and lookup handlers.
//!
//! Registration is unauthenticated: it is how a caller obtains an identity
//! in the first place.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    handlers::AppError,
    models::{CreateUser, CreatedUser, UserResponse},
    state::AppState,
};

/// Register a user (POST /api/users).
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = state
        .users
        .register_user(payload.username, payload.fullname)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedUser { user_id })))
}

/// Get a user by id (GET /api/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.get_user(id).await?;
    Ok(Json(user.into()))
}

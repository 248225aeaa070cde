//! Axum extractors for caller identity.
//!
//! Identity arrives in the `x-user-id` header. This is the seam where a
//! session or token layer in front of this service injects the
//! authenticated user id; the handlers only care that a well-formed id is
//! present.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the calling user. Returns 401 if the header is missing or
/// malformed.
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or((StatusCode::UNAUTHORIZED, "Missing x-user-id header"))?;

        let value = header
            .to_str()
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid x-user-id header"))?;

        let user_id = value
            .parse()
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid x-user-id header"))?;

        Ok(CurrentUser(user_id))
    }
}

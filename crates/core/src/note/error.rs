use thiserror::Error;
use uuid::Uuid;

use crate::storage::RepositoryError;

/// Errors raised by the note, collaboration and access-control services.
///
/// Every failure a caller can observe carries one of these kinds; the
/// variant, not the message, is the contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The referenced entity does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// The user holds neither owner nor collaborator rights on the note.
    #[error("user {user_id} may not access note {note_id}")]
    Forbidden { note_id: Uuid, user_id: Uuid },
    /// A mutation that should have affected a row affected none, or a
    /// uniqueness constraint was violated.
    #[error("invariant violated: {0}")]
    Invariant(String),
    /// Store or cache infrastructure failed; details stay server-side.
    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ServiceError {
    /// Shorthand for a not-found failure on a note id.
    pub fn note_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "Note",
            id: id.to_string(),
        }
    }

    /// Shorthand for a not-found failure on a user id.
    pub fn user_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "User",
            id: id.to_string(),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            RepositoryError::AlreadyExists { entity_type, id } => {
                Self::Invariant(format!("{entity_type} already exists: {id}"))
            }
            other => Self::Infrastructure(other.to_string()),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

//! Collaboration grant management.

use std::sync::Arc;

use uuid::Uuid;

use noteshare_core::note::{Collaboration, ServiceError, ServiceResult};
use noteshare_core::storage::CollaborationRepository;

/// Grants and revokes shared access to notes.
///
/// Neither operation touches the listing cache: the collaborator's cached
/// listing stays as-is until it expires or the note's owner next mutates.
pub struct CollaborationService {
    collaborations: Arc<dyn CollaborationRepository>,
}

impl CollaborationService {
    /// Creates a new collaboration service.
    pub fn new(collaborations: Arc<dyn CollaborationRepository>) -> Self {
        Self { collaborations }
    }

    /// Grants `user_id` shared access to the note and returns the grant id.
    ///
    /// A duplicate grant for the same (note, user) pair fails with
    /// `Invariant`, as does a zero-row insert.
    pub async fn add_collaboration(&self, note_id: Uuid, user_id: Uuid) -> ServiceResult<Uuid> {
        let collaboration = Collaboration::new(note_id, user_id);

        let id = self
            .collaborations
            .insert_collaboration(&collaboration)
            .await?
            .ok_or_else(|| {
                ServiceError::Invariant("collaboration insert affected no rows".to_string())
            })?;

        tracing::debug!(%note_id, %user_id, collaboration_id = %id, "Collaboration added");
        Ok(id)
    }

    /// Revokes the grant for a (note, user) pair.
    ///
    /// Fails with `Invariant` when no such grant exists.
    pub async fn remove_collaboration(&self, note_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        self.collaborations
            .delete_collaboration(note_id, user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::Invariant("collaboration delete affected no rows".to_string())
            })?;

        tracing::debug!(%note_id, %user_id, "Collaboration removed");
        Ok(())
    }
}

//! Ownership and collaboration checks for notes.
//!
//! Ownership is checked first: it needs a single note lookup and doubles as
//! the existence check. A collaboration grant is a secondary, additive path
//! that only matters once ownership has been denied.

use std::sync::Arc;

use uuid::Uuid;

use noteshare_core::note::{ServiceError, ServiceResult};
use noteshare_core::storage::{CollaborationRepository, NoteRepository};

/// Decides whether a user holds owner or access rights on a note.
pub struct AccessControl {
    notes: Arc<dyn NoteRepository>,
    collaborations: Arc<dyn CollaborationRepository>,
}

impl AccessControl {
    /// Creates a new access control component over the given stores.
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        collaborations: Arc<dyn CollaborationRepository>,
    ) -> Self {
        Self {
            notes,
            collaborations,
        }
    }

    /// Verifies that `user_id` owns the note.
    ///
    /// Fails with `NotFound` when no note has that id and with `Forbidden`
    /// when the note belongs to someone else.
    pub async fn verify_owner(&self, note_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let note = self
            .notes
            .select_note(note_id)
            .await?
            .ok_or_else(|| ServiceError::note_not_found(note_id))?;

        if note.owner_id != user_id {
            tracing::debug!(%note_id, %user_id, "Ownership denied");
            return Err(ServiceError::Forbidden { note_id, user_id });
        }

        Ok(())
    }

    /// Verifies that `user_id` owns or collaborates on the note.
    ///
    /// A nonexistent note fails with `NotFound` before any collaboration
    /// lookup happens. When ownership is denied, a collaboration grant
    /// allows access; otherwise the original denial is returned unchanged,
    /// so callers see a single `Forbidden` regardless of which check failed.
    pub async fn verify_access(&self, note_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let denied = match self.verify_owner(note_id, user_id).await {
            Ok(()) => return Ok(()),
            Err(err @ ServiceError::Forbidden { .. }) => err,
            Err(other) => return Err(other),
        };

        match self
            .collaborations
            .collaboration_exists(note_id, user_id)
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(denied),
            Err(err) => {
                tracing::warn!(%note_id, %user_id, error = %err, "Collaboration lookup failed");
                Err(denied)
            }
        }
    }
}

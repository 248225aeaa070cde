use async_trait::async_trait;
use uuid::Uuid;

use crate::note::{Collaboration, Note, NoteChanges, User};

use super::Result;

/// Repository for note rows.
///
/// Mutations mirror a `RETURNING`-style store response: `update_note` and
/// `delete_note` hand back the affected row, or `None` when the id matched
/// nothing, so callers can distinguish not-found from success without a
/// second lookup. `insert_note` returns `None` when the insert reported
/// zero rows affected.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Inserts a note, returning its id, or `None` on a zero-row insert.
    async fn insert_note(&self, note: &Note) -> Result<Option<Uuid>>;

    /// Gets a note by its id.
    async fn select_note(&self, id: Uuid) -> Result<Option<Note>>;

    /// Gets every note the user owns or collaborates on, deduplicated by
    /// note id.
    async fn select_notes_for_user(&self, user_id: Uuid) -> Result<Vec<Note>>;

    /// Updates a note's title, body and tags, returning the updated row.
    async fn update_note(&self, id: Uuid, changes: &NoteChanges) -> Result<Option<Note>>;

    /// Deletes a note, returning the deleted row. Collaboration rows
    /// referencing the note are removed as well.
    async fn delete_note(&self, id: Uuid) -> Result<Option<Note>>;
}

/// Repository for collaboration rows.
#[async_trait]
pub trait CollaborationRepository: Send + Sync {
    /// Inserts a collaboration, returning its id, or `None` on a zero-row
    /// insert. A duplicate (note, user) pair fails with `AlreadyExists`.
    async fn insert_collaboration(&self, collaboration: &Collaboration) -> Result<Option<Uuid>>;

    /// Deletes the collaboration for a (note, user) pair, returning its id,
    /// or `None` when no such grant exists.
    async fn delete_collaboration(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Uuid>>;

    /// Checks whether a collaboration exists for a (note, user) pair.
    async fn collaboration_exists(&self, note_id: Uuid, user_id: Uuid) -> Result<bool>;
}

/// Repository for user rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, returning their id, or `None` on a zero-row insert.
    async fn insert_user(&self, user: &User) -> Result<Option<Uuid>>;

    /// Gets a user by their id.
    async fn select_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their username.
    async fn select_user_by_username(&self, username: &str) -> Result<Option<User>>;
}

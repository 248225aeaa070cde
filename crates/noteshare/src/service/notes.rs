//! Note lifecycle operations with a cache-aside listing layer.
//!
//! Listings are cached per user under `notes:{user_id}`:
//! - **Reads**: check the cache first, on miss query the store and populate
//!   the cache
//! - **Writes**: persist to the store, then delete the owner's listing key
//!
//! The cache is never load-bearing: any cache failure degrades to the store
//! path or is logged and ignored.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use noteshare_core::cache::{deserialize_notes, serialize_notes, user_notes_key, Cache};
use noteshare_core::note::{Note, NoteChanges, NoteWithOwner, ServiceError, ServiceResult};
use noteshare_core::storage::{NoteRepository, UserRepository};

/// Orchestrates note CRUD against the note store, the user store (for the
/// owner-username join) and the listing cache.
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
    users: Arc<dyn UserRepository>,
    cache: Arc<dyn Cache>,
    cache_ttl: Option<Duration>,
}

impl NoteService {
    /// Creates a new note service.
    ///
    /// # Arguments
    ///
    /// * `notes` - The note store
    /// * `users` - The user store, used only for display-name joins
    /// * `cache` - The listing cache
    /// * `cache_ttl` - Optional time-to-live for cached listings; `None`
    ///   leaves entries in place until invalidated
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn Cache>,
        cache_ttl: Option<Duration>,
    ) -> Self {
        Self {
            notes,
            users,
            cache,
            cache_ttl,
        }
    }

    /// Creates a note and returns its id.
    pub async fn add_note(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: Vec<String>,
        owner_id: Uuid,
    ) -> ServiceResult<Uuid> {
        let note = Note::new(title, body, tags, owner_id);

        let id = self
            .notes
            .insert_note(&note)
            .await?
            .ok_or_else(|| ServiceError::Invariant("note insert affected no rows".to_string()))?;

        self.invalidate_listing(owner_id).await;

        tracing::debug!(note_id = %id, %owner_id, "Note created");
        Ok(id)
    }

    /// Lists every note visible to the user (owned + collaborated).
    ///
    /// Served cache-aside: a hit returns the cached listing verbatim, a miss
    /// (or any cache failure) falls through to the store and repopulates the
    /// cache best-effort.
    pub async fn get_notes(&self, user_id: Uuid) -> ServiceResult<Vec<Note>> {
        let cache_key = user_notes_key(user_id);

        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_notes(&bytes) {
                Ok(notes) => {
                    tracing::trace!(%user_id, count = notes.len(), "Cache hit for note listing");
                    return Ok(notes);
                }
                // Undecodable value - treat as a miss and recompute
                Err(err) => {
                    tracing::warn!(%user_id, error = %err, "Cached listing deserialization failed");
                }
            },
            Ok(None) => {
                tracing::trace!(%user_id, "Cache miss for note listing");
            }
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "Cache read failed, falling back to store");
            }
        }

        let notes = self.notes.select_notes_for_user(user_id).await?;

        if let Ok(bytes) = serialize_notes(&notes) {
            if let Err(err) = self.cache.set(&cache_key, &bytes, self.cache_ttl).await {
                tracing::warn!(%user_id, error = %err, "Failed to cache note listing");
            }
        }

        Ok(notes)
    }

    /// Fetches a single note, annotated with the owner's username.
    ///
    /// The username join is best-effort: a missing user or a failed lookup
    /// leaves the field empty rather than failing the fetch.
    pub async fn get_note(&self, id: Uuid) -> ServiceResult<NoteWithOwner> {
        let note = self
            .notes
            .select_note(id)
            .await?
            .ok_or_else(|| ServiceError::note_not_found(id))?;

        let username = match self.users.select_user(note.owner_id).await {
            Ok(user) => user.map(|u| u.username),
            Err(err) => {
                tracing::warn!(note_id = %id, error = %err, "Owner lookup failed");
                None
            }
        };

        Ok(NoteWithOwner { note, username })
    }

    /// Updates a note's title, body and tags.
    pub async fn edit_note(&self, id: Uuid, changes: &NoteChanges) -> ServiceResult<()> {
        let updated = self
            .notes
            .update_note(id, changes)
            .await?
            .ok_or_else(|| ServiceError::note_not_found(id))?;

        self.invalidate_listing(updated.owner_id).await;

        tracing::debug!(note_id = %id, owner_id = %updated.owner_id, "Note updated");
        Ok(())
    }

    /// Deletes a note. The store cascades deletion of its collaborations.
    pub async fn delete_note(&self, id: Uuid) -> ServiceResult<()> {
        let deleted = self
            .notes
            .delete_note(id)
            .await?
            .ok_or_else(|| ServiceError::note_not_found(id))?;

        self.invalidate_listing(deleted.owner_id).await;

        tracing::debug!(note_id = %id, owner_id = %deleted.owner_id, "Note deleted");
        Ok(())
    }

    /// Drops the owner's cached listing after a successful mutation.
    /// Invalidation is best-effort; a failure leaves a stale entry behind
    /// until the next successful invalidation or TTL expiry.
    async fn invalidate_listing(&self, owner_id: Uuid) {
        let key = user_notes_key(owner_id);
        if let Err(err) = self.cache.delete(&key).await {
            tracing::warn!(%owner_id, error = %err, "Failed to invalidate note listing cache");
        }
    }
}

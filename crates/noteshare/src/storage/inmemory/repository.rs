//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use noteshare_core::note::{Collaboration, Note, NoteChanges, User};
use noteshare_core::storage::{
    CollaborationRepository, NoteRepository, RepositoryError, Result, UserRepository,
};

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
/// Note deletion cascades collaborations the way the SQLite schema does.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    notes: Arc<RwLock<HashMap<Uuid, Note>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    collaborations: Arc<RwLock<HashMap<(Uuid, Uuid), Uuid>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            notes: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            collaborations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of collaboration rows referencing a note (test helper).
    #[cfg(test)]
    pub async fn collaboration_count_for_note(&self, note_id: Uuid) -> usize {
        self.collaborations
            .read()
            .await
            .keys()
            .filter(|(n, _)| *n == note_id)
            .count()
    }
}

#[async_trait]
impl NoteRepository for InMemoryRepository {
    async fn insert_note(&self, note: &Note) -> Result<Option<Uuid>> {
        let mut notes = self.notes.write().await;
        if notes.contains_key(&note.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Note",
                id: note.id.to_string(),
            });
        }
        notes.insert(note.id, note.clone());
        Ok(Some(note.id))
    }

    async fn select_note(&self, id: Uuid) -> Result<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.get(&id).cloned())
    }

    async fn select_notes_for_user(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        let collaborations = self.collaborations.read().await;

        let collaborated: Vec<Uuid> = collaborations
            .keys()
            .filter(|(_, u)| *u == user_id)
            .map(|(n, _)| *n)
            .collect();

        Ok(notes
            .values()
            .filter(|n| n.owner_id == user_id || collaborated.contains(&n.id))
            .cloned()
            .collect())
    }

    async fn update_note(&self, id: Uuid, changes: &NoteChanges) -> Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        match notes.get_mut(&id) {
            Some(note) => {
                note.apply(changes, chrono::Utc::now());
                Ok(Some(note.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_note(&self, id: Uuid) -> Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        let deleted = notes.remove(&id);

        if deleted.is_some() {
            // Cascade: drop every collaboration row referencing the note
            let mut collaborations = self.collaborations.write().await;
            collaborations.retain(|(note_id, _), _| *note_id != id);
        }

        Ok(deleted)
    }
}

#[async_trait]
impl CollaborationRepository for InMemoryRepository {
    async fn insert_collaboration(&self, collaboration: &Collaboration) -> Result<Option<Uuid>> {
        // FK behavior: the note must exist
        if !self
            .notes
            .read()
            .await
            .contains_key(&collaboration.note_id)
        {
            return Err(RepositoryError::InvalidData(format!(
                "note does not exist: {}",
                collaboration.note_id
            )));
        }

        let mut collaborations = self.collaborations.write().await;
        let key = (collaboration.note_id, collaboration.user_id);
        if collaborations.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Collaboration",
                id: collaboration.id.to_string(),
            });
        }
        collaborations.insert(key, collaboration.id);
        Ok(Some(collaboration.id))
    }

    async fn delete_collaboration(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Uuid>> {
        let mut collaborations = self.collaborations.write().await;
        Ok(collaborations.remove(&(note_id, user_id)))
    }

    async fn collaboration_exists(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        let collaborations = self.collaborations.read().await;
        Ok(collaborations.contains_key(&(note_id, user_id)))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, user: &User) -> Result<Option<Uuid>> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.username.clone(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(Some(user.id))
    }

    async fn select_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn select_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

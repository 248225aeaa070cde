//! Shared mocks for service-layer tests.
//!
//! Each mock tracks call counts so tests can assert which store paths ran
//! (e.g. that a cache hit skipped the note store entirely).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use noteshare_core::cache::{Cache, CacheError, Result as CacheResult};
use noteshare_core::note::{Collaboration, Note, NoteChanges, User};
use noteshare_core::storage::{
    CollaborationRepository, NoteRepository, RepositoryError, Result, UserRepository,
};

/// Mock note repository backed by a HashMap.
pub struct MockNoteRepository {
    notes: RwLock<HashMap<Uuid, Note>>,
    pub select_calls: AtomicUsize,
    pub select_for_user_calls: AtomicUsize,
    /// When set, `insert_note` reports zero rows affected.
    pub report_zero_row_insert: AtomicBool,
    fail_with: Mutex<Option<RepositoryError>>,
}

impl MockNoteRepository {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(HashMap::new()),
            select_calls: AtomicUsize::new(0),
            select_for_user_calls: AtomicUsize::new(0),
            report_zero_row_insert: AtomicBool::new(false),
            fail_with: Mutex::new(None),
        }
    }

    pub async fn insert(&self, note: Note) {
        self.notes.write().await.insert(note.id, note);
    }

    pub fn fail_with(&self, error: RepositoryError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    fn check_failure(&self) -> Result<()> {
        match self.fail_with.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn insert_note(&self, note: &Note) -> Result<Option<Uuid>> {
        self.check_failure()?;
        if self.report_zero_row_insert.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.notes.write().await.insert(note.id, note.clone());
        Ok(Some(note.id))
    }

    async fn select_note(&self, id: Uuid) -> Result<Option<Note>> {
        self.check_failure()?;
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn select_notes_for_user(&self, user_id: Uuid) -> Result<Vec<Note>> {
        self.check_failure()?;
        self.select_for_user_calls.fetch_add(1, Ordering::SeqCst);
        // Ownership only; collaborated notes are seeded directly in tests
        // that need them.
        Ok(self
            .notes
            .read()
            .await
            .values()
            .filter(|n| n.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_note(&self, id: Uuid, changes: &NoteChanges) -> Result<Option<Note>> {
        self.check_failure()?;
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
        self.check_failure()?;
        Ok(self.notes.write().await.remove(&id))
    }
}

/// Mock collaboration repository backed by a HashMap.
pub struct MockCollaborationRepository {
    grants: RwLock<HashMap<(Uuid, Uuid), Uuid>>,
    exists_calls: AtomicUsize,
    fail_with: Mutex<Option<RepositoryError>>,
}

impl MockCollaborationRepository {
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
            exists_calls: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
        }
    }

    pub async fn grant(&self, note_id: Uuid, user_id: Uuid) {
        self.grants
            .write()
            .await
            .insert((note_id, user_id), Uuid::new_v4());
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, error: RepositoryError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    fn check_failure(&self) -> Result<()> {
        match self.fail_with.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CollaborationRepository for MockCollaborationRepository {
    async fn insert_collaboration(&self, collaboration: &Collaboration) -> Result<Option<Uuid>> {
        self.check_failure()?;
        let mut grants = self.grants.write().await;
        let key = (collaboration.note_id, collaboration.user_id);
        if grants.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Collaboration",
                id: collaboration.id.to_string(),
            });
        }
        grants.insert(key, collaboration.id);
        Ok(Some(collaboration.id))
    }

    async fn delete_collaboration(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Uuid>> {
        self.check_failure()?;
        Ok(self.grants.write().await.remove(&(note_id, user_id)))
    }

    async fn collaboration_exists(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.check_failure()?;
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.grants.read().await.contains_key(&(note_id, user_id)))
    }
}

/// Mock user repository backed by a HashMap.
pub struct MockUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
    fail_with: Mutex<Option<RepositoryError>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            fail_with: Mutex::new(None),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub fn fail_with(&self, error: RepositoryError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    fn check_failure(&self) -> Result<()> {
        match self.fail_with.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert_user(&self, user: &User) -> Result<Option<Uuid>> {
        self.check_failure()?;
        self.users.write().await.insert(user.id, user.clone());
        Ok(Some(user.id))
    }

    async fn select_user(&self, id: Uuid) -> Result<Option<User>> {
        self.check_failure()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn select_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.check_failure()?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// Mock cache with switchable read/write failures.
pub struct MockCache {
    pub store: RwLock<HashMap<String, Vec<u8>>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub get_calls: AtomicUsize,
}

impl MockCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            get_calls: AtomicUsize::new(0),
        }
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }
}

#[async_trait]
impl Cache for MockCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("cache unreachable".into()));
        }
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("cache unreachable".into()));
        }
        self.store
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("cache unreachable".into()));
        }
        self.store.write().await.remove(key);
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when a create request carries none.
pub const DEFAULT_NOTE_TITLE: &str = "untitled";

/// A note owned by a single user, optionally shared with collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// Ordered list of tags; order is preserved through storage and cache.
    pub tags: Vec<String>,
    /// The creating user. Immutable after creation.
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with a fresh id and current timestamps.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        tags: Vec<String>,
        owner_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            tags,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets a specific ID for this note (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets specific timestamps for this note (useful for testing).
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Applies an edit to the mutable fields and refreshes `updated_at`.
    /// Id and owner are never touched.
    pub fn apply(&mut self, changes: &NoteChanges, at: DateTime<Utc>) {
        self.title = changes.title.clone();
        self.body = changes.body.clone();
        self.tags = changes.tags.clone();
        self.updated_at = at;
    }
}

/// The fields a note edit may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteChanges {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

/// A note annotated with its owner's username for display.
///
/// The username is best-effort: a failed or empty user lookup leaves it
/// `None` without failing the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithOwner {
    #[serde(flatten)]
    pub note: Note,
    pub username: Option<String>,
}

/// A grant of shared read/edit rights on a note.
///
/// At most one collaboration exists per (note, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: Uuid,
    #[serde(rename = "noteId")]
    pub note_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

impl Collaboration {
    /// Creates a new collaboration grant with a fresh id.
    pub fn new(note_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            note_id,
            user_id,
        }
    }
}

/// A registered user. Credentials live outside this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh id and current timestamp.
    pub fn new(username: impl Into<String>, fullname: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            fullname: fullname.into(),
            created_at: Utc::now(),
        }
    }
}

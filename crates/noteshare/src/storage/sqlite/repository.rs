//! SQLite repository implementation.
//!
//! Implements the repository traits from `noteshare_core::storage` using
//! SQLite. Mutations run with `RETURNING`, so a missing row comes back as
//! an empty result instead of needing a second lookup.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use noteshare_core::note::{Collaboration, Note, NoteChanges, User};
use noteshare_core::storage::{
    CollaborationRepository, NoteRepository, RepositoryError, Result, UserRepository,
};

use super::conversions::{format_datetime, row_to_note, row_to_user, tags_to_json};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// NoteRepository implementation
// ============================================================================

#[async_trait]
impl NoteRepository for SqliteRepository {
    async fn insert_note(&self, note: &Note) -> Result<Option<Uuid>> {
        let id = note.id.to_string();
        let title = note.title.clone();
        let body = note.body.clone();
        let tags_json = tags_to_json(&note.tags)?;
        let owner = note.owner_id.to_string();
        let created_at = format_datetime(&note.created_at);
        let updated_at = format_datetime(&note.updated_at);
        let note_id = note.id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::INSERT_NOTE).map_err(wrap_err)?;
                match stmt.query_row(
                    rusqlite::params![id, title, body, tags_json, owner, created_at, updated_at],
                    |row| row.get::<_, String>(0),
                ) {
                    Ok(_) => Ok(Some(())),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map(|inserted| inserted.map(|_| note.id))
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", note_id))
    }

    async fn select_note(&self, id: Uuid) -> Result<Option<Note>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_NOTE_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_note) {
                    Ok(note) => Ok(Some(note)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", id.to_string()))
    }

    async fn select_notes_for_user(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_NOTES_FOR_USER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&user_id_str], row_to_note)
                    .map_err(wrap_err)?;

                let mut notes = Vec::new();
                for row_result in rows {
                    notes.push(row_result.map_err(wrap_err)?);
                }
                Ok(notes)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn update_note(&self, id: Uuid, changes: &NoteChanges) -> Result<Option<Note>> {
        let id_str = id.to_string();
        let title = changes.title.clone();
        let body = changes.body.clone();
        let tags_json = tags_to_json(&changes.tags)?;
        let updated_at = format_datetime(&chrono::Utc::now());

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::UPDATE_NOTE).map_err(wrap_err)?;
                match stmt.query_row(
                    rusqlite::params![id_str, title, body, tags_json, updated_at],
                    row_to_note,
                ) {
                    Ok(note) => Ok(Some(note)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", id.to_string()))
    }

    async fn delete_note(&self, id: Uuid) -> Result<Option<Note>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::DELETE_NOTE).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_note) {
                    Ok(note) => Ok(Some(note)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", id.to_string()))
    }
}

// ============================================================================
// CollaborationRepository implementation
// ============================================================================

#[async_trait]
impl CollaborationRepository for SqliteRepository {
    async fn insert_collaboration(&self, collaboration: &Collaboration) -> Result<Option<Uuid>> {
        let id = collaboration.id.to_string();
        let note_id = collaboration.note_id.to_string();
        let user_id = collaboration.user_id.to_string();
        let collaboration_id = collaboration.id;

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::INSERT_COLLABORATION)
                    .map_err(wrap_err)?;
                match stmt.query_row(rusqlite::params![id, note_id, user_id], |row| {
                    row.get::<_, String>(0)
                }) {
                    Ok(_) => Ok(Some(())),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map(|inserted| inserted.map(|_| collaboration_id))
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaboration", collaboration_id.to_string()))
    }

    async fn delete_collaboration(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Uuid>> {
        let note_id_str = note_id.to_string();
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::DELETE_COLLABORATION)
                    .map_err(wrap_err)?;
                match stmt.query_row([&note_id_str, &user_id_str], |row| {
                    row.get::<_, String>(0)
                }) {
                    Ok(id) => Ok(Some(id)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaboration", note_id.to_string()))?
            .map(|id| {
                Uuid::parse_str(&id).map_err(|e| RepositoryError::InvalidData(e.to_string()))
            })
            .transpose()
    }

    async fn collaboration_exists(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        let note_id_str = note_id.to_string();
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_COLLABORATION).map_err(wrap_err)?;
                match stmt.query_row([&note_id_str, &user_id_str], |row| {
                    row.get::<_, String>(0)
                }) {
                    Ok(_) => Ok(true),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaboration", note_id.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, user: &User) -> Result<Option<Uuid>> {
        let id = user.id.to_string();
        let username = user.username.clone();
        let fullname = user.fullname.clone();
        let created_at = format_datetime(&user.created_at);
        let user_id = user.id;

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::INSERT_USER).map_err(wrap_err)?;
                match stmt.query_row(rusqlite::params![id, username, fullname, created_at], |row| {
                    row.get::<_, String>(0)
                }) {
                    Ok(_) => Ok(Some(())),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map(|inserted| inserted.map(|_| user_id))
            .map_err(|e| map_tokio_rusqlite_error(e, "User", user_id.to_string()))
    }

    async fn select_user(&self, id: Uuid) -> Result<Option<User>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn select_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let username_owned = username.to_string();
        let username_for_err = username.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_USERNAME)
                    .map_err(wrap_err)?;
                match stmt.query_row([&username_owned], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", username_for_err))
    }
}

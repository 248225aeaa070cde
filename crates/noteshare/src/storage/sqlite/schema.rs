//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.
//!
//! Mutations use `RETURNING` so the affected row comes back with the
//! statement that changed it; an empty result means the id matched nothing.

/// SQL statement to create all tables.
///
/// The foreign_keys pragma must be on for the ON DELETE CASCADE clauses to
/// fire; SQLite defaults it to off per connection.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    fullname TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Notes table
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    tags TEXT NOT NULL,
    owner TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (owner) REFERENCES users(id) ON DELETE CASCADE
);

-- Collaborations table
CREATE TABLE IF NOT EXISTS collaborations (
    id TEXT PRIMARY KEY,
    note_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    UNIQUE (note_id, user_id),
    FOREIGN KEY (note_id) REFERENCES notes(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner);
CREATE INDEX IF NOT EXISTS idx_collaborations_user_id ON collaborations(user_id);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, username, fullname, created_at)
VALUES (?1, ?2, ?3, ?4)
RETURNING id
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, fullname, created_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_USERNAME: &str = r#"
SELECT id, username, fullname, created_at
FROM users
WHERE username = ?1
"#;

// Note queries
pub const INSERT_NOTE: &str = r#"
INSERT INTO notes (id, title, body, tags, owner, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
RETURNING id
"#;

pub const SELECT_NOTE_BY_ID: &str = r#"
SELECT id, title, body, tags, owner, created_at, updated_at
FROM notes
WHERE id = ?1
"#;

pub const SELECT_NOTES_FOR_USER: &str = r#"
SELECT DISTINCT n.id, n.title, n.body, n.tags, n.owner, n.created_at, n.updated_at
FROM notes n
LEFT JOIN collaborations c ON c.note_id = n.id
WHERE n.owner = ?1 OR c.user_id = ?1
"#;

pub const UPDATE_NOTE: &str = r#"
UPDATE notes
SET title = ?2, body = ?3, tags = ?4, updated_at = ?5
WHERE id = ?1
RETURNING id, title, body, tags, owner, created_at, updated_at
"#;

pub const DELETE_NOTE: &str = r#"
DELETE FROM notes
WHERE id = ?1
RETURNING id, title, body, tags, owner, created_at, updated_at
"#;

// Collaboration queries
pub const INSERT_COLLABORATION: &str = r#"
INSERT INTO collaborations (id, note_id, user_id)
VALUES (?1, ?2, ?3)
RETURNING id
"#;

pub const DELETE_COLLABORATION: &str = r#"
DELETE FROM collaborations
WHERE note_id = ?1 AND user_id = ?2
RETURNING id
"#;

pub const SELECT_COLLABORATION: &str = r#"
SELECT id
FROM collaborations
WHERE note_id = ?1 AND user_id = ?2
"#;

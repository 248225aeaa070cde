//! Pure functions for serializing/deserializing note listings to/from cache
//! bytes.
//!
//! JSON keeps cached values human-readable, which makes stale entries easy
//! to inspect from the cache CLI.

use crate::note::Note;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a note listing to JSON bytes.
pub fn serialize_notes(notes: &[Note]) -> Result<Vec<u8>> {
    serde_json::to_vec(notes).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a note listing.
pub fn deserialize_notes(bytes: &[u8]) -> Result<Vec<Note>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

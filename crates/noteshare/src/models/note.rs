use serde::{Deserialize, Serialize};
use uuid::Uuid;

use noteshare_core::note::{NoteChanges, DEFAULT_NOTE_TITLE};

fn default_title() -> String {
    DEFAULT_NOTE_TITLE.to_string()
}

/// Request payload for creating a new note.
///
/// A missing title falls back to the default; tags may be omitted.
#[derive(Debug, Deserialize)]
pub struct CreateNote {
    #[serde(default = "default_title")]
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for updating a note.
#[derive(Debug, Deserialize)]
pub struct UpdateNote {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UpdateNote {
    /// Converts the update request into the changes the store applies.
    pub fn into_changes(self) -> NoteChanges {
        NoteChanges {
            title: self.title,
            body: self.body,
            tags: self.tags,
        }
    }
}

/// Response payload for a created note.
#[derive(Debug, Serialize)]
pub struct CreatedNote {
    #[serde(rename = "noteId")]
    pub note_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_note_title_defaults() {
        let payload: CreateNote = serde_json::from_str(r#"{"body": "hi", "tags": ["a"]}"#).unwrap();
        assert_eq!(payload.title, DEFAULT_NOTE_TITLE);
        assert_eq!(payload.tags, vec!["a"]);
    }

    #[test]
    fn test_create_note_tags_default_empty() {
        let payload: CreateNote =
            serde_json::from_str(r#"{"title": "t", "body": "hi"}"#).unwrap();
        assert!(payload.tags.is_empty());
    }

    #[test]
    fn test_create_note_missing_body_is_rejected() {
        let result = serde_json::from_str::<CreateNote>(r#"{"title": "t"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_created_note_uses_camel_case() {
        let response = CreatedNote {
            note_id: Uuid::nil(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("noteId").is_some());
    }
}

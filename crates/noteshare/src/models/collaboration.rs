use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for granting or revoking a collaboration.
#[derive(Debug, Deserialize)]
pub struct CollaborationRequest {
    #[serde(rename = "noteId")]
    pub note_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Response payload for a created collaboration.
#[derive(Debug, Serialize)]
pub struct CreatedCollaboration {
    #[serde(rename = "collaborationId")]
    pub collaboration_id: Uuid,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use noteshare_core::note::User;

/// Request payload for registering a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub fullname: String,
}

/// Response payload for a registered user.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Response payload for a user lookup.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
        }
    }
}

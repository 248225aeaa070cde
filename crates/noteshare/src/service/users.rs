//! User registration and lookup.

use std::sync::Arc;

use uuid::Uuid;

use noteshare_core::note::{ServiceError, ServiceResult, User};
use noteshare_core::storage::UserRepository;

/// Registers users and resolves them by id.
///
/// Credentials and sessions live outside this service; it only manages the
/// user records that notes and collaborations reference.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a user and returns their id.
    ///
    /// A taken username fails with `Invariant`.
    pub async fn register_user(
        &self,
        username: impl Into<String>,
        fullname: impl Into<String>,
    ) -> ServiceResult<Uuid> {
        let username = username.into();

        if self
            .users
            .select_user_by_username(&username)
            .await?
            .is_some()
        {
            return Err(ServiceError::Invariant(format!(
                "username already taken: {username}"
            )));
        }

        let user = User::new(username, fullname);
        let id = self
            .users
            .insert_user(&user)
            .await?
            .ok_or_else(|| ServiceError::Invariant("user insert affected no rows".to_string()))?;

        tracing::debug!(user_id = %id, username = %user.username, "User registered");
        Ok(id)
    }

    /// Gets a user by id.
    pub async fn get_user(&self, id: Uuid) -> ServiceResult<User> {
        self.users
            .select_user(id)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(id))
    }
}

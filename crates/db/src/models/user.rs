//! User entity model and DTOs.

use std::fmt;

use sqlx::FromRow;
use taskmanager_core::credentials::Credentials;
use taskmanager_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// `Debug` omits the password; it is stored as submitted.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password: String,
    pub created_at: Timestamp,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// DTO for registering a new user.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl From<Credentials> for NewUser {
    fn from(creds: Credentials) -> Self {
        Self {
            username: creds.username,
            password: creds.password,
        }
    }
}

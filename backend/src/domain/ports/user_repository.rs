//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{BlogId, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the requested username.
        DuplicateUsername { username: String } => "username '{username}' is already taken",
    }
}

/// Credential store for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Uniqueness of the username is checked inside the same write, so two
    /// concurrent registrations for one name cannot both succeed.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;

    /// Record `blog` as created by `user`.
    ///
    /// Returns `false` when no user has that identifier; nothing is written.
    async fn append_blog(&self, user: &UserId, blog: &BlogId)
    -> Result<bool, UserPersistenceError>;

    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Remove every user.
    async fn delete_all(&self) -> Result<(), UserPersistenceError>;
}

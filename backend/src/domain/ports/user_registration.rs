//! Driving port for creating accounts.

use async_trait::async_trait;

use crate::domain::{Error, UserProfile};

/// Raw registration input as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// Requested unique username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Plain-text password.
    pub password: String,
}

/// Register new users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate, hash and store a new user, returning its public profile.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error>;
}

//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to list users together with the entries
//! they created, without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Blog, Error, UserProfile};

/// A user's public profile with the entries they created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithBlogs {
    /// Public profile.
    pub profile: UserProfile,
    /// Entries owned by the user that still exist, oldest first.
    pub blogs: Vec<Blog>,
}

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user with their entries.
    async fn list_users(&self) -> Result<Vec<UserWithBlogs>, Error>;
}

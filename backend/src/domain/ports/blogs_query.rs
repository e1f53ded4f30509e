//! Driving port for public blog reads.

use async_trait::async_trait;

use crate::domain::{BlogId, BlogStats, BlogView, Error};

/// Read-only access to blog entries. Never requires an identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsQuery: Send + Sync {
    /// Every entry with its owner expanded.
    async fn list(&self) -> Result<Vec<BlogView>, Error>;

    /// One entry with its owner expanded.
    async fn get(&self, id: &BlogId) -> Result<BlogView, Error>;

    /// Aggregate statistics over every entry.
    async fn stats(&self) -> Result<BlogStats, Error>;
}

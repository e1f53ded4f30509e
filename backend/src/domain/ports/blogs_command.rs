//! Driving port for blog mutations.
//!
//! The caller's identity is passed explicitly. `None` means the request
//! carried no verified token; each operation decides whether that is fatal.

use async_trait::async_trait;

use crate::domain::{BlogChanges, BlogDraft, BlogId, BlogView, Error, Identity};

/// Create, remove and edit blog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsCommand: Send + Sync {
    /// Create an entry owned by the caller.
    async fn create(&self, identity: Option<Identity>, draft: BlogDraft)
    -> Result<BlogView, Error>;

    /// Delete an entry. Only its owner may do so.
    async fn delete(&self, identity: Option<Identity>, id: &BlogId) -> Result<(), Error>;

    /// Apply a partial update, subject to the configured update policy.
    async fn update(
        &self,
        identity: Option<Identity>,
        id: &BlogId,
        changes: BlogChanges,
    ) -> Result<BlogView, Error>;
}

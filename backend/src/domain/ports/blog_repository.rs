//! Port for blog entry persistence.

use async_trait::async_trait;

use crate::domain::{Blog, BlogId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by blog repository adapters.
    pub enum BlogPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
    }
}

/// Entry store for blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a new entry.
    async fn insert(&self, blog: &Blog) -> Result<(), BlogPersistenceError>;

    /// Fetch an entry by identifier.
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError>;

    /// Overwrite an existing entry. Returns `false` when it no longer exists.
    async fn replace(&self, blog: &Blog) -> Result<bool, BlogPersistenceError>;

    /// Remove an entry. Returns `false` when it did not exist.
    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError>;

    /// All entries in insertion order.
    async fn list(&self) -> Result<Vec<Blog>, BlogPersistenceError>;

    /// Remove every entry.
    async fn delete_all(&self) -> Result<(), BlogPersistenceError>;
}

/// Empty store for tests that never reach blog persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBlogRepository;

#[async_trait]
impl BlogRepository for FixtureBlogRepository {
    async fn insert(&self, _blog: &Blog) -> Result<(), BlogPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError> {
        Ok(None)
    }

    async fn replace(&self, _blog: &Blog) -> Result<bool, BlogPersistenceError> {
        Ok(false)
    }

    async fn delete(&self, _id: &BlogId) -> Result<bool, BlogPersistenceError> {
        Ok(false)
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogPersistenceError> {
        Ok(Vec::new())
    }

    async fn delete_all(&self) -> Result<(), BlogPersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let found = FixtureBlogRepository
            .find_by_id(&BlogId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_delete_reports_absent() {
        let removed = FixtureBlogRepository
            .delete(&BlogId::random())
            .await
            .expect("fixture delete succeeds");
        assert!(!removed);
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = BlogPersistenceError::query("cursor exhausted");
        assert!(err.to_string().contains("cursor exhausted"));
    }
}

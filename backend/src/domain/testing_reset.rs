//! Store reset used by end-to-end suites.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{BlogRepository, TestingReset, UserRepository};
use crate::domain::service_support::{map_blog_repository_error, map_user_repository_error};

/// Service implementing the [`TestingReset`] driving port.
#[derive(Clone)]
pub struct StoreResetService<B: ?Sized, U: ?Sized> {
    blogs: Arc<B>,
    users: Arc<U>,
}

impl<B: ?Sized, U: ?Sized> StoreResetService<B, U> {
    /// Create the service over both stores.
    pub fn new(blogs: Arc<B>, users: Arc<U>) -> Self {
        Self { blogs, users }
    }
}

#[async_trait]
impl<B: ?Sized, U: ?Sized> TestingReset for StoreResetService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn reset(&self) -> Result<(), Error> {
        self.blogs
            .delete_all()
            .await
            .map_err(map_blog_repository_error)?;
        self.users
            .delete_all()
            .await
            .map_err(map_user_repository_error)?;
        warn!("store reset: all users and blogs deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{BlogPersistenceError, MockBlogRepository, MockUserRepository};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn reset_clears_both_stores() {
        let mut blogs = MockBlogRepository::new();
        blogs.expect_delete_all().times(1).return_once(|| Ok(()));
        let mut users = MockUserRepository::new();
        users.expect_delete_all().times(1).return_once(|| Ok(()));

        StoreResetService::new(Arc::new(blogs), Arc::new(users))
            .reset()
            .await
            .expect("reset succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn reset_stops_when_blogs_cannot_be_cleared() {
        let mut blogs = MockBlogRepository::new();
        blogs
            .expect_delete_all()
            .times(1)
            .return_once(|| Err(BlogPersistenceError::query("write concern failed")));
        let mut users = MockUserRepository::new();
        users.expect_delete_all().times(0);

        let err = StoreResetService::new(Arc::new(blogs), Arc::new(users))
            .reset()
            .await
            .expect_err("blog wipe failed");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}

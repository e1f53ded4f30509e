//! Blog entry services.
//!
//! [`BlogService`] implements both blog driving ports. Reads are public.
//! Create and delete need a verified identity, and delete additionally needs
//! that identity to own the entry. Update is gated by [`UpdatePolicy`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{BlogRepository, BlogsCommand, BlogsQuery, UserRepository};
use crate::domain::service_support::{
    expand_owner, expand_owners, map_blog_repository_error, map_user_repository_error,
};
use crate::domain::{
    Blog, BlogChanges, BlogDraft, BlogId, BlogStats, BlogValidationError, BlogView, Error,
    Identity, TOKEN_MISSING_OR_INVALID, UpdatePolicy, UserId, require_identity,
};

/// Message returned when an entry does not exist.
pub const BLOG_NOT_FOUND: &str = "blog not found";
/// Message returned when a non-owner tries to delete an entry.
pub const ONLY_CREATOR_CAN_DELETE: &str = "only creator can delete blog";
/// Message returned when a non-owner tries to update under [`UpdatePolicy::OwnerOnly`].
pub const ONLY_CREATOR_CAN_UPDATE: &str = "only creator can update blog";

fn map_validation_error(error: BlogValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(serde_json::json!({ "field": error.field() }))
}

fn unknown_owner(owner: &UserId) -> Error {
    warn!(%owner, "verified token names a user that no longer exists");
    Error::unauthorized(TOKEN_MISSING_OR_INVALID)
}

fn blog_not_found() -> Error {
    Error::not_found(BLOG_NOT_FOUND)
}

/// Blog service implementing [`BlogsCommand`] and [`BlogsQuery`].
#[derive(Clone)]
pub struct BlogService<B: ?Sized, U: ?Sized> {
    blogs: Arc<B>,
    users: Arc<U>,
    update_policy: UpdatePolicy,
}

impl<B: ?Sized, U: ?Sized> BlogService<B, U> {
    /// Create a service with the default [`UpdatePolicy`].
    pub fn new(blogs: Arc<B>, users: Arc<U>) -> Self {
        Self {
            blogs,
            users,
            update_policy: UpdatePolicy::default(),
        }
    }

    /// Replace the update policy.
    #[must_use]
    pub fn with_update_policy(mut self, update_policy: UpdatePolicy) -> Self {
        self.update_policy = update_policy;
        self
    }
}

impl<B: ?Sized, U: ?Sized> BlogService<B, U>
where
    B: BlogRepository,
{
    async fn load(&self, id: &BlogId) -> Result<Blog, Error> {
        self.blogs
            .find_by_id(id)
            .await
            .map_err(map_blog_repository_error)?
            .ok_or_else(blog_not_found)
    }
}

#[async_trait]
impl<B: ?Sized, U: ?Sized> BlogsCommand for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        identity: Option<Identity>,
        draft: BlogDraft,
    ) -> Result<BlogView, Error> {
        let identity = require_identity(identity)?;
        let blog = Blog::create(BlogId::random(), draft, identity.user_id)
            .map_err(map_validation_error)?;
        // A verified token may outlive its account.
        let owner = self
            .users
            .find_by_id(blog.owner())
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| unknown_owner(blog.owner()))?;

        self.blogs
            .insert(&blog)
            .await
            .map_err(map_blog_repository_error)?;
        // Second, independent write. A failure here leaves the entry without
        // its back-reference; readers tolerate that.
        let recorded = self
            .users
            .append_blog(blog.owner(), &blog.id())
            .await
            .map_err(map_user_repository_error)?;
        if !recorded {
            // Owner removed between the lookup and the append.
            self.blogs
                .delete(&blog.id())
                .await
                .map_err(map_blog_repository_error)?;
            return Err(unknown_owner(blog.owner()));
        }

        info!(blog_id = %blog.id(), owner = %blog.owner(), "created blog");
        Ok(BlogView {
            blog,
            owner: Some(owner.profile()),
        })
    }

    async fn delete(&self, identity: Option<Identity>, id: &BlogId) -> Result<(), Error> {
        let identity = require_identity(identity)?;
        let blog = self.load(id).await?;
        if blog.owner() != &identity.user_id {
            return Err(Error::forbidden(ONLY_CREATOR_CAN_DELETE));
        }

        let removed = self
            .blogs
            .delete(id)
            .await
            .map_err(map_blog_repository_error)?;
        if !removed {
            return Err(blog_not_found());
        }
        info!(blog_id = %id, owner = %identity.user_id, "deleted blog");
        Ok(())
    }

    async fn update(
        &self,
        identity: Option<Identity>,
        id: &BlogId,
        changes: BlogChanges,
    ) -> Result<BlogView, Error> {
        let caller = match self.update_policy {
            UpdatePolicy::Public => None,
            UpdatePolicy::Authenticated | UpdatePolicy::OwnerOnly => {
                Some(require_identity(identity)?)
            }
        };

        let mut blog = self.load(id).await?;
        if self.update_policy == UpdatePolicy::OwnerOnly
            && caller.as_ref().map(|c| &c.user_id) != Some(blog.owner())
        {
            return Err(Error::forbidden(ONLY_CREATOR_CAN_UPDATE));
        }

        blog.apply(changes).map_err(map_validation_error)?;
        let replaced = self
            .blogs
            .replace(&blog)
            .await
            .map_err(map_blog_repository_error)?;
        if !replaced {
            return Err(blog_not_found());
        }
        expand_owner(self.users.as_ref(), blog).await
    }
}

#[async_trait]
impl<B: ?Sized, U: ?Sized> BlogsQuery for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn list(&self) -> Result<Vec<BlogView>, Error> {
        let blogs = self
            .blogs
            .list()
            .await
            .map_err(map_blog_repository_error)?;
        expand_owners(self.users.as_ref(), blogs).await
    }

    async fn get(&self, id: &BlogId) -> Result<BlogView, Error> {
        let blog = self.load(id).await?;
        expand_owner(self.users.as_ref(), blog).await
    }

    async fn stats(&self) -> Result<BlogStats, Error> {
        let blogs = self
            .blogs
            .list()
            .await
            .map_err(map_blog_repository_error)?;
        Ok(BlogStats::from_blogs(&blogs))
    }
}

#[cfg(test)]
#[path = "blog_service_tests.rs"]
mod tests;

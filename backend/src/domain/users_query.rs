//! User listing service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{BlogRepository, UserRepository, UserWithBlogs, UsersQuery};
use crate::domain::service_support::{map_blog_repository_error, map_user_repository_error};
use crate::domain::{Blog, BlogId, Error};

/// Service implementing the [`UsersQuery`] driving port.
#[derive(Clone)]
pub struct UsersQueryService<U: ?Sized, B: ?Sized> {
    users: Arc<U>,
    blogs: Arc<B>,
}

impl<U: ?Sized, B: ?Sized> UsersQueryService<U, B> {
    /// Create the service over both stores.
    pub fn new(users: Arc<U>, blogs: Arc<B>) -> Self {
        Self { users, blogs }
    }
}

#[async_trait]
impl<U: ?Sized, B: ?Sized> UsersQuery for UsersQueryService<U, B>
where
    U: UserRepository,
    B: BlogRepository,
{
    async fn list_users(&self) -> Result<Vec<UserWithBlogs>, Error> {
        let users = self
            .users
            .list()
            .await
            .map_err(map_user_repository_error)?;
        let mut blogs: HashMap<BlogId, Blog> = self
            .blogs
            .list()
            .await
            .map_err(map_blog_repository_error)?
            .into_iter()
            .map(|blog| (blog.id(), blog))
            .collect();

        // Back-references to deleted entries are skipped.
        Ok(users
            .into_iter()
            .map(|user| UserWithBlogs {
                blogs: user.blogs().iter().filter_map(|id| blogs.remove(id)).collect(),
                profile: user.profile(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockBlogRepository, MockUserRepository};
    use crate::domain::{BlogDraft, PasswordDigest, User, UserId, Username};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn list_users_attaches_existing_blogs_only() {
        let owner_id = UserId::random();
        let kept = Blog::create(
            BlogId::random(),
            BlogDraft {
                title: "kept".to_owned(),
                author: "B".to_owned(),
                url: "C".to_owned(),
                likes: None,
            },
            owner_id.clone(),
        )
        .expect("valid blog");
        let deleted = BlogId::random();
        let user = User::new(
            owner_id,
            Username::from_stored("root"),
            "Superuser",
            PasswordDigest::new("digest"),
            vec![kept.id(), deleted],
        );

        let mut users = MockUserRepository::new();
        users.expect_list().times(1).return_once(move || Ok(vec![user]));
        let mut blogs = MockBlogRepository::new();
        blogs.expect_list().times(1).return_once(move || Ok(vec![kept]));

        let listed = UsersQueryService::new(Arc::new(users), Arc::new(blogs))
            .list_users()
            .await
            .expect("listing succeeds");

        assert_eq!(listed.len(), 1);
        let entry = listed.first().expect("one user");
        assert_eq!(entry.profile.username.as_ref(), "root");
        let titles: Vec<&str> = entry.blogs.iter().map(Blog::title).collect();
        assert_eq!(titles, vec!["kept"]);
    }
}

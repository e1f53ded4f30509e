//! In-process repositories used when no document store is configured.
//!
//! Each store is a `Vec` behind a `std::sync::RwLock`; guards are held for a
//! single operation and never across an `.await`. Insertion order is the
//! listing order. A poisoned lock surfaces as a query error rather than a
//! panic.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    BlogPersistenceError, BlogRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Blog, BlogId, User, UserId};

const POISONED: &str = "in-memory store lock poisoned";

/// Users held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .read()
            .map_err(|_| UserPersistenceError::query(POISONED))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .write()
            .map_err(|_| UserPersistenceError::query(POISONED))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.write()?;
        if users.iter().any(|u| u.username() == user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.read()?.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .read()?
            .iter()
            .find(|u| u.username().as_ref() == username)
            .cloned())
    }

    async fn append_blog(
        &self,
        user: &UserId,
        blog: &BlogId,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.write()?;
        let Some(owner) = users.iter_mut().find(|u| u.id() == user) else {
            return Ok(false);
        };
        owner.record_blog(*blog);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.read()?.clone())
    }

    async fn delete_all(&self) -> Result<(), UserPersistenceError> {
        self.write()?.clear();
        Ok(())
    }
}

/// Blog entries held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBlogRepository {
    blogs: RwLock<Vec<Blog>>,
}

impl InMemoryBlogRepository {
    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Blog>>, BlogPersistenceError> {
        self.blogs
            .read()
            .map_err(|_| BlogPersistenceError::query(POISONED))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Blog>>, BlogPersistenceError> {
        self.blogs
            .write()
            .map_err(|_| BlogPersistenceError::query(POISONED))
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn insert(&self, blog: &Blog) -> Result<(), BlogPersistenceError> {
        self.write()?.push(blog.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError> {
        Ok(self.read()?.iter().find(|b| b.id() == *id).cloned())
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, BlogPersistenceError> {
        let mut blogs = self.write()?;
        match blogs.iter_mut().find(|b| b.id() == blog.id()) {
            Some(slot) => {
                *slot = blog.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError> {
        let mut blogs = self.write()?;
        let before = blogs.len();
        blogs.retain(|b| b.id() != *id);
        Ok(blogs.len() != before)
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogPersistenceError> {
        Ok(self.read()?.clone())
    }

    async fn delete_all(&self) -> Result<(), BlogPersistenceError> {
        self.write()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the in-memory stores.
    use super::*;
    use crate::domain::{BlogChanges, BlogDraft, PasswordDigest, Username};
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    fn user(name: &str) -> User {
        User::new(
            UserId::random(),
            Username::from_stored(name),
            "Someone",
            PasswordDigest::new("digest"),
            Vec::new(),
        )
    }

    fn blog(title: &str, owner: &UserId) -> Blog {
        Blog::create(
            BlogId::random(),
            BlogDraft {
                title: title.to_owned(),
                author: "Author".to_owned(),
                url: "http://example.com".to_owned(),
                likes: None,
            },
            owner.clone(),
        )
        .expect("valid blog")
    }

    #[fixture]
    fn users() -> InMemoryUserRepository {
        InMemoryUserRepository::default()
    }

    #[fixture]
    fn blogs() -> InMemoryBlogRepository {
        InMemoryBlogRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_is_rejected(users: InMemoryUserRepository) {
        users.create(&user("root")).await.expect("first insert");
        let err = users
            .create(&user("root"))
            .await
            .expect_err("second insert collides");
        assert_eq!(err, UserPersistenceError::duplicate_username("root"));
        assert_eq!(users.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_for_one_name_admit_exactly_one() {
        let users = Arc::new(InMemoryUserRepository::default());
        let attempts = (0..16).map(|_| {
            let users = Arc::clone(&users);
            tokio::spawn(async move { users.create(&user("root")).await })
        });
        let mut successes = 0;
        for attempt in attempts.collect::<Vec<_>>() {
            if attempt.await.expect("task joins").is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn append_blog_extends_owner_only(users: InMemoryUserRepository) {
        let owner = user("root");
        let other = user("mluukkai");
        users.create(&owner).await.expect("insert owner");
        users.create(&other).await.expect("insert other");
        let id = BlogId::random();

        assert!(users.append_blog(owner.id(), &id).await.expect("append"));
        let recorded = users
            .append_blog(&UserId::random(), &BlogId::random())
            .await
            .expect("append for unknown user");
        assert!(!recorded);

        let stored = users
            .find_by_username("root")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.blogs(), &[id]);
        let untouched = users
            .find_by_id(other.id())
            .await
            .expect("lookup")
            .expect("present");
        assert!(untouched.blogs().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn replace_and_delete_report_presence(blogs: InMemoryBlogRepository) {
        let owner = UserId::random();
        let mut entry = blog("first", &owner);
        blogs.insert(&entry).await.expect("insert");

        entry
            .apply(BlogChanges {
                likes: Some(3),
                ..BlogChanges::default()
            })
            .expect("valid change");
        assert!(blogs.replace(&entry).await.expect("replace"));
        let stored = blogs
            .find_by_id(&entry.id())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.likes(), 3);

        assert!(blogs.delete(&entry.id()).await.expect("delete"));
        assert!(!blogs.delete(&entry.id()).await.expect("second delete"));
        assert!(!blogs.replace(&entry).await.expect("replace after delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn list_preserves_insertion_order_and_delete_all_empties(blogs: InMemoryBlogRepository) {
        let owner = UserId::random();
        for title in ["a", "b", "c"] {
            blogs.insert(&blog(title, &owner)).await.expect("insert");
        }
        let titles: Vec<String> = blogs
            .list()
            .await
            .expect("list")
            .iter()
            .map(|b| b.title().to_owned())
            .collect();
        assert_eq!(titles, ["a", "b", "c"]);

        blogs.delete_all().await.expect("wipe");
        assert!(blogs.list().await.expect("list").is_empty());
    }
}

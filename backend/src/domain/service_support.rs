//! Internal helpers shared by the user and blog services.

use std::collections::HashMap;

use crate::domain::ports::{
    BlogPersistenceError, PasswordHashError, UserPersistenceError, UserRepository,
};
use crate::domain::{Blog, BlogView, Error, UserId, UserProfile};

/// Message returned when registration hits an existing username.
pub(crate) const DUPLICATE_USERNAME: &str = "expected 'username' to be unique";

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => Error::invalid_request(DUPLICATE_USERNAME)
            .with_details(serde_json::json!({ "field": "username" })),
    }
}

pub(crate) fn map_blog_repository_error(error: BlogPersistenceError) -> Error {
    match error {
        BlogPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("blog repository unavailable: {message}"))
        }
        BlogPersistenceError::Query { message } => {
            Error::internal(format!("blog repository error: {message}"))
        }
    }
}

pub(crate) fn map_password_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hasher error: {error}"))
}

/// Pair each blog with its owner's profile, reading every user once.
pub(crate) async fn expand_owners<U>(users: &U, blogs: Vec<Blog>) -> Result<Vec<BlogView>, Error>
where
    U: UserRepository + ?Sized,
{
    if blogs.is_empty() {
        return Ok(Vec::new());
    }
    let profiles: HashMap<UserId, UserProfile> = users
        .list()
        .await
        .map_err(map_user_repository_error)?
        .into_iter()
        .map(|user| (user.id().clone(), user.profile()))
        .collect();

    Ok(blogs
        .into_iter()
        .map(|blog| {
            let owner = profiles.get(blog.owner()).cloned();
            BlogView { blog, owner }
        })
        .collect())
}

/// Pair one blog with its owner's profile.
pub(crate) async fn expand_owner<U>(users: &U, blog: Blog) -> Result<BlogView, Error>
where
    U: UserRepository + ?Sized,
{
    let owner = users
        .find_by_id(blog.owner())
        .await
        .map_err(map_user_repository_error)?
        .map(|user| user.profile());
    Ok(BlogView { blog, owner })
}

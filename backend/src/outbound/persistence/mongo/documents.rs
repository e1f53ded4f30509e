//! Stored document shapes and their translation to domain values.
//!
//! Documents are internal to the adapter. Identifiers are persisted as UUID
//! strings; a document that fails to parse back surfaces as a query error
//! naming the offending field.

use serde::{Deserialize, Serialize};

use crate::domain::{Blog, BlogId, PasswordDigest, User, UserId, Username};

/// Why a stored document could not be turned back into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {collection} document has invalid {field}")]
pub struct CorruptDocument {
    pub collection: &'static str,
    pub field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    #[serde(default)]
    pub blogs: Vec<String>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().to_owned(),
            password_hash: user.password_digest().as_str().to_owned(),
            blogs: user.blogs().iter().map(ToString::to_string).collect(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = CorruptDocument;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let corrupt = |field| CorruptDocument {
            collection: "users",
            field,
        };
        let id = UserId::new(&doc.id).map_err(|_| corrupt("_id"))?;
        let blogs = doc
            .blogs
            .iter()
            .map(BlogId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| corrupt("blogs"))?;
        Ok(User::new(
            id,
            Username::from_stored(doc.username),
            doc.name,
            PasswordDigest::new(doc.password_hash),
            blogs,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BlogDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: String,
}

impl TryFrom<&Blog> for BlogDocument {
    type Error = CorruptDocument;

    fn try_from(blog: &Blog) -> Result<Self, Self::Error> {
        let likes = i64::try_from(blog.likes()).map_err(|_| CorruptDocument {
            collection: "blogs",
            field: "likes",
        })?;
        Ok(Self {
            id: blog.id().to_string(),
            title: blog.title().to_owned(),
            author: blog.author().to_owned(),
            url: blog.url().to_owned(),
            likes,
            user: blog.owner().to_string(),
        })
    }
}

impl TryFrom<BlogDocument> for Blog {
    type Error = CorruptDocument;

    fn try_from(doc: BlogDocument) -> Result<Self, Self::Error> {
        let corrupt = |field| CorruptDocument {
            collection: "blogs",
            field,
        };
        let id = BlogId::new(&doc.id).map_err(|_| corrupt("_id"))?;
        let owner = UserId::new(&doc.user).map_err(|_| corrupt("user"))?;
        let likes = u64::try_from(doc.likes).map_err(|_| corrupt("likes"))?;
        Ok(Blog::from_stored(
            id, doc.title, doc.author, doc.url, likes, owner,
        ))
    }
}

//! MongoDB-backed `BlogRepository` implementation.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};

use crate::domain::ports::{BlogPersistenceError, BlogRepository};
use crate::domain::{Blog, BlogId};

use super::BLOGS_COLLECTION;
use super::documents::BlogDocument;
use super::error_mapping::map_mongo_error;

/// Blog entries stored in the `blogs` collection.
#[derive(Clone, Debug)]
pub struct MongoBlogRepository {
    blogs: Collection<BlogDocument>,
}

impl MongoBlogRepository {
    pub(super) fn new(database: &Database) -> Self {
        Self {
            blogs: database.collection(BLOGS_COLLECTION),
        }
    }
}

fn map_error(error: &mongodb::error::Error) -> BlogPersistenceError {
    map_mongo_error(
        error,
        BlogPersistenceError::query,
        BlogPersistenceError::connection,
    )
}

fn encode(blog: &Blog) -> Result<BlogDocument, BlogPersistenceError> {
    BlogDocument::try_from(blog).map_err(|err| BlogPersistenceError::query(err.to_string()))
}

fn decode(doc: BlogDocument) -> Result<Blog, BlogPersistenceError> {
    Blog::try_from(doc).map_err(|err| BlogPersistenceError::query(err.to_string()))
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn insert(&self, blog: &Blog) -> Result<(), BlogPersistenceError> {
        self.blogs
            .insert_one(encode(blog)?)
            .await
            .map_err(|err| map_error(&err))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, BlogPersistenceError> {
        self.blogs
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|err| map_error(&err))?
            .map(decode)
            .transpose()
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, BlogPersistenceError> {
        let result = self
            .blogs
            .replace_one(doc! { "_id": blog.id().to_string() }, encode(blog)?)
            .await
            .map_err(|err| map_error(&err))?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogPersistenceError> {
        let result = self
            .blogs
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|err| map_error(&err))?;
        Ok(result.deleted_count > 0)
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogPersistenceError> {
        let docs: Vec<BlogDocument> = self
            .blogs
            .find(doc! {})
            .sort(doc! { "$natural": 1 })
            .await
            .map_err(|err| map_error(&err))?
            .try_collect()
            .await
            .map_err(|err| map_error(&err))?;
        docs.into_iter().map(decode).collect()
    }

    async fn delete_all(&self) -> Result<(), BlogPersistenceError> {
        self.blogs
            .delete_many(doc! {})
            .await
            .map_err(|err| map_error(&err))?;
        Ok(())
    }
}

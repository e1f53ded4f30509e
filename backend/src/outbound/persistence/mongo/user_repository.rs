//! MongoDB-backed `UserRepository` implementation.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{BlogId, User, UserId};

use super::USERS_COLLECTION;
use super::documents::{CorruptDocument, UserDocument};
use super::error_mapping::{is_duplicate_key, map_mongo_error};

/// Users stored in the `users` collection.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub(super) fn new(database: &Database) -> Self {
        Self {
            users: database.collection(USERS_COLLECTION),
        }
    }
}

fn map_error(error: &mongodb::error::Error) -> UserPersistenceError {
    map_mongo_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn decode(doc: UserDocument) -> Result<User, UserPersistenceError> {
    User::try_from(doc).map_err(|err: CorruptDocument| {
        warn!(%err, "unreadable user document");
        UserPersistenceError::query(err.to_string())
    })
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        match self.users.insert_one(UserDocument::from(user)).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            )),
            Err(err) => Err(map_error(&err)),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.users
            .find_one(doc! { "_id": id.as_ref() })
            .await
            .map_err(|err| map_error(&err))?
            .map(decode)
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.users
            .find_one(doc! { "username": username })
            .await
            .map_err(|err| map_error(&err))?
            .map(decode)
            .transpose()
    }

    async fn append_blog(
        &self,
        user: &UserId,
        blog: &BlogId,
    ) -> Result<bool, UserPersistenceError> {
        let result = self
            .users
            .update_one(
                doc! { "_id": user.as_ref() },
                doc! { "$push": { "blogs": blog.to_string() } },
            )
            .await
            .map_err(|err| map_error(&err))?;
        Ok(result.matched_count > 0)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let docs: Vec<UserDocument> = self
            .users
            .find(doc! {})
            .sort(doc! { "$natural": 1 })
            .await
            .map_err(|err| map_error(&err))?
            .try_collect()
            .await
            .map_err(|err| map_error(&err))?;
        docs.into_iter().map(decode).collect()
    }

    async fn delete_all(&self) -> Result<(), UserPersistenceError> {
        self.users
            .delete_many(doc! {})
            .await
            .map_err(|err| map_error(&err))?;
        Ok(())
    }
}

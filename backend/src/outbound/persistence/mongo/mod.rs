//! MongoDB-backed repositories.
//!
//! [`MongoStore`] owns the client and database handle; the repositories it
//! hands out share them. Documents use the textual UUID as `_id`, and
//! usernames carry a unique index so concurrent registrations for the same
//! name resolve to exactly one winner.
//!
//! # Example
//!
//! ```ignore
//! use bloglist::outbound::persistence::{MongoConfig, MongoStore};
//!
//! let store = MongoStore::connect(&MongoConfig::new("mongodb://localhost:27017", "bloglist")).await?;
//! let users = store.users();
//! let blogs = store.blogs();
//! ```

mod blog_repository;
mod documents;
mod error_mapping;
mod user_repository;

use std::time::Duration;

use bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use tracing::info;

pub use blog_repository::MongoBlogRepository;
pub use user_repository::MongoUserRepository;

use documents::UserDocument;

pub(crate) const USERS_COLLECTION: &str = "users";
pub(crate) const BLOGS_COLLECTION: &str = "blogs";

/// Errors raised while establishing the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MongoStoreError {
    /// The connection string could not be parsed or the server is unreachable.
    #[error("failed to connect to MongoDB: {message}")]
    Connect { message: String },

    /// Required indexes could not be created.
    #[error("failed to prepare MongoDB indexes: {message}")]
    Index { message: String },
}

impl MongoStoreError {
    /// Create a connect error with the given message.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    /// Create an index error with the given message.
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index {
            message: message.into(),
        }
    }
}

/// Connection settings for [`MongoStore`].
#[derive(Debug, Clone)]
pub struct MongoConfig {
    uri: String,
    database: String,
    server_selection_timeout: Duration,
}

impl MongoConfig {
    /// Create a configuration for `database` on the server at `uri`.
    ///
    /// Server selection gives up after 10 seconds unless overridden.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            server_selection_timeout: Duration::from_secs(10),
        }
    }

    /// Set how long to wait for a reachable server.
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Database holding the `users` and `blogs` collections.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Shared MongoDB handle.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect, ping the server and ensure the username index exists.
    ///
    /// # Errors
    ///
    /// Returns [`MongoStoreError::Connect`] when the URI is invalid or the
    /// ping fails, and [`MongoStoreError::Index`] when index creation fails.
    pub async fn connect(config: &MongoConfig) -> Result<Self, MongoStoreError> {
        let mut options = ClientOptions::parse(config.uri.as_str())
            .await
            .map_err(|err| MongoStoreError::connect(err.to_string()))?;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());
        let client =
            Client::with_options(options).map_err(|err| MongoStoreError::connect(err.to_string()))?;
        let database = client.database(config.database());
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| MongoStoreError::connect(err.to_string()))?;

        let unique = IndexOptions::builder()
            .unique(true)
            .name(Some("username_unique".to_owned()))
            .build();
        database
            .collection::<UserDocument>(USERS_COLLECTION)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "username": 1 })
                    .options(unique)
                    .build(),
            )
            .await
            .map_err(|err| MongoStoreError::index(err.to_string()))?;

        info!(database = config.database(), "connected to MongoDB");
        Ok(Self { database })
    }

    /// Repository over the `users` collection.
    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository::new(&self.database)
    }

    /// Repository over the `blogs` collection.
    pub fn blogs(&self) -> MongoBlogRepository {
        MongoBlogRepository::new(&self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults_and_overrides() {
        let config = MongoConfig::new("mongodb://localhost:27017", "bloglist");
        assert_eq!(config.database(), "bloglist");
        assert_eq!(config.server_selection_timeout, Duration::from_secs(10));

        let config = config.with_server_selection_timeout(Duration::from_millis(250));
        assert_eq!(config.server_selection_timeout, Duration::from_millis(250));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_uri_is_a_connect_error() {
        let err = MongoStore::connect(&MongoConfig::new("not-a-mongo-uri", "bloglist"))
            .await
            .expect_err("uri is rejected before dialing");
        assert!(matches!(err, MongoStoreError::Connect { .. }));
    }

    #[rstest]
    fn store_error_display() {
        assert!(
            MongoStoreError::index("boom")
                .to_string()
                .contains("indexes: boom")
        );
    }
}

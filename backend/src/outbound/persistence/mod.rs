//! Repository adapters for users and blog entries.
//!
//! Two backends implement the same domain ports:
//!
//! - **memory**: process-local stores used by tests and when no MongoDB URI
//!   is configured.
//! - **mongo**: MongoDB collections with a unique username index.
//!
//! Adapters only translate between stored shapes and domain types and map
//! driver failures onto the port error enums.
//!
//! # Example
//!
//! ```
//! use bloglist::outbound::persistence::{InMemoryBlogRepository, InMemoryUserRepository};
//!
//! let _users = InMemoryUserRepository::default();
//! let _blogs = InMemoryBlogRepository::default();
//! ```

mod memory;
mod mongo;

pub use memory::{InMemoryBlogRepository, InMemoryUserRepository};
pub use mongo::{
    MongoBlogRepository, MongoConfig, MongoStore, MongoStoreError, MongoUserRepository,
};

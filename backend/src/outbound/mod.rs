//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: in-memory and MongoDB repositories for users and blogs
//! - **security**: Argon2 password digests and JWT identity tokens
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod security;

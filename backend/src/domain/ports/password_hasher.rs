//! Driven port for one-way password digests.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a digest failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be decoded.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// Hash new passwords and check candidates against stored digests.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted digest for `password`.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Report whether `password` produces `digest`.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError>;
}

/// Reversible stand-in for tests that do not care about hashing cost.
///
/// Digests are the password prefixed with `plain$`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        Ok(PasswordDigest::new(format!("plain${password}")))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
        let stored = digest
            .as_str()
            .strip_prefix("plain$")
            .ok_or_else(|| PasswordHashError::malformed_digest("missing fixture prefix"))?;
        Ok(stored == password)
    }
}

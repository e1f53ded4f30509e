//! Driving port used by end-to-end suites to start from an empty store.

use async_trait::async_trait;

use crate::domain::Error;

/// Wipe all users and blog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestingReset: Send + Sync {
    /// Remove every blog entry, then every user.
    async fn reset(&self) -> Result<(), Error>;
}

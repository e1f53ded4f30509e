//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to exchange credentials for a signed identity
//! token without importing the credential store or the token adapter.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials, UserProfile};

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Bearer token for subsequent requests.
    pub token: AuthToken,
    /// Profile of the authenticated user.
    pub profile: UserProfile,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a token for the matching user.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error>;
}

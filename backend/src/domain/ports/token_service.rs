//! Driven port for issuing and verifying identity tokens.
//!
//! Both operations are pure CPU work over a process-wide secret, so the port
//! is synchronous. Verification must fail, never panic, on malformed input.

use crate::domain::{AuthToken, Identity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token is malformed, forged, tampered with or expired.
        Invalid { message: String } => "identity token rejected: {message}",
        /// The adapter could not produce a signature.
        Signing { message: String } => "identity token could not be signed: {message}",
    }
}

/// Sign identities into bearer tokens and recover them again.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Produce a signed token asserting `identity`.
    fn issue(&self, identity: &Identity) -> Result<AuthToken, TokenError>;

    /// Check a token's signature and claims and return the identity it
    /// asserts.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}

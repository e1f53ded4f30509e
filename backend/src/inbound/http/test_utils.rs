//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockBlogsCommand, MockBlogsQuery, MockLoginService, MockTestingReset, MockUserRegistration,
    MockUsersQuery, TokenError, TokenService,
};
use crate::domain::{AuthToken, Identity, UserId, UserProfile, Username};
use crate::inbound::http::state::HttpState;
use uuid::Uuid;

/// Token accepted by [`StubTokenService`].
pub const VALID_TOKEN: &str = "valid-token";

/// Fixed identifier of the user [`VALID_TOKEN`] resolves to.
pub const ROOT_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn root_user_id() -> UserId {
    UserId::from_uuid(Uuid::from_u128(0x3fa8_5f64_5717_4562_b3fc_2c96_3f66_afa6))
}

/// Identity asserted by [`VALID_TOKEN`].
pub fn root_identity() -> Identity {
    Identity {
        user_id: root_user_id(),
        username: Username::from_stored("root"),
    }
}

/// Public profile matching [`root_identity`].
pub fn root_profile() -> UserProfile {
    UserProfile {
        id: root_user_id(),
        username: Username::from_stored("root"),
        name: "Superuser".to_owned(),
    }
}

/// Token service that recognises exactly one token.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubTokenService;

impl TokenService for StubTokenService {
    fn issue(&self, _identity: &Identity) -> Result<AuthToken, TokenError> {
        Ok(AuthToken::new(VALID_TOKEN))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        if token == VALID_TOKEN {
            Ok(root_identity())
        } else {
            Err(TokenError::invalid("unknown token"))
        }
    }
}

/// Mock-backed ports for handler tests.
///
/// Mocks left at their defaults panic if called, so each test only primes
/// the port it exercises.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub registration: MockUserRegistration,
    pub users: MockUsersQuery,
    pub blogs: MockBlogsCommand,
    pub blogs_query: MockBlogsQuery,
    pub reset: MockTestingReset,
}

impl From<TestPorts> for HttpState {
    fn from(ports: TestPorts) -> Self {
        Self {
            login: Arc::new(ports.login),
            registration: Arc::new(ports.registration),
            users: Arc::new(ports.users),
            blogs: Arc::new(ports.blogs),
            blogs_query: Arc::new(ports.blogs_query),
            reset: Arc::new(ports.reset),
        }
    }
}

//! Password login service.
//!
//! Unknown usernames still pay for one digest verification against a
//! throwaway digest, so response timing does not reveal which usernames
//! exist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{LoginService, LoginSession, PasswordHasher, TokenService, UserRepository};
use crate::domain::service_support::{map_password_hash_error, map_user_repository_error};
use crate::domain::{Error, Identity, LoginCredentials, PasswordDigest};

/// Message returned for every rejected login.
pub const INVALID_CREDENTIALS: &str = "invalid username or password";

const DUMMY_PASSWORD: &str = "bloglist-timing-equaliser";

/// Login service implementing the [`LoginService`] driving port.
pub struct PasswordLoginService<R: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    dummy_digest: Option<PasswordDigest>,
}

impl<R: ?Sized, H: ?Sized, T: ?Sized> PasswordLoginService<R, H, T>
where
    H: PasswordHasher,
{
    /// Create the service, deriving the digest used for unknown usernames.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        let dummy_digest = match hasher.hash(DUMMY_PASSWORD) {
            Ok(digest) => Some(digest),
            Err(err) => {
                warn!(error = %err, "could not derive dummy digest; unknown-user logins skip hashing");
                None
            }
        };
        Self {
            users,
            hasher,
            tokens,
            dummy_digest,
        }
    }

    fn burn_verification(&self, password: &str) {
        if let Some(digest) = &self.dummy_digest
            && let Err(err) = self.hasher.verify(password, digest)
        {
            debug!(error = %err, "dummy digest verification failed");
        }
    }
}

#[async_trait]
impl<R: ?Sized, H: ?Sized, T: ?Sized> LoginService for PasswordLoginService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error> {
        let found = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_repository_error)?;

        let Some(user) = found else {
            self.burn_verification(credentials.password());
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_digest())
            .map_err(map_password_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let identity = Identity {
            user_id: user.id().clone(),
            username: user.username().clone(),
        };
        let token = self
            .tokens
            .issue(&identity)
            .map_err(|err| Error::internal(format!("token issue failed: {err}")))?;

        info!(user_id = %user.id(), "user logged in");
        Ok(LoginSession {
            token,
            profile: user.profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        FixturePasswordHasher, MockPasswordHasher, MockTokenService, MockUserRepository, TokenError,
    };
    use crate::domain::{AuthToken, ErrorCode, User, UserId, Username};
    use rstest::{fixture, rstest};

    #[fixture]
    fn root() -> User {
        User::new(
            UserId::random(),
            Username::from_stored("root"),
            "Superuser",
            PasswordDigest::new("plain$sekret"),
            Vec::new(),
        )
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("credential shape")
    }

    fn users_returning(user: Option<User>) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(move |_| Ok(user));
        users
    }

    fn issuing_tokens() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .returning(|identity| Ok(AuthToken::new(format!("token-for-{}", identity.username))));
        tokens
    }

    #[rstest]
    #[tokio::test]
    async fn correct_password_issues_token_for_user(root: User) {
        let expected_id = root.id().clone();
        let service = PasswordLoginService::new(
            Arc::new(users_returning(Some(root))),
            Arc::new(FixturePasswordHasher),
            Arc::new(issuing_tokens()),
        );

        let session = service
            .login(&credentials("root", "sekret"))
            .await
            .expect("login succeeds");

        assert_eq!(session.token.as_str(), "token-for-root");
        assert_eq!(session.profile.id, expected_id);
        assert_eq!(session.profile.name, "Superuser");
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_identically(root: User) {
        let wrong_password = PasswordLoginService::new(
            Arc::new(users_returning(Some(root))),
            Arc::new(FixturePasswordHasher),
            Arc::new(MockTokenService::new()),
        )
        .login(&credentials("root", "wrong"))
        .await
        .expect_err("wrong password");

        let unknown_user = PasswordLoginService::new(
            Arc::new(users_returning(None)),
            Arc::new(FixturePasswordHasher),
            Arc::new(MockTokenService::new()),
        )
        .login(&credentials("nobody", "sekret"))
        .await
        .expect_err("unknown user");

        assert_eq!(wrong_password.code(), ErrorCode::Unauthorized);
        assert_eq!(wrong_password.code(), unknown_user.code());
        assert_eq!(wrong_password.message(), unknown_user.message());
        assert_eq!(unknown_user.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_still_runs_a_verification() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .return_once(|_| Ok(PasswordDigest::new("dummy")));
        hasher
            .expect_verify()
            .withf(|_, digest: &PasswordDigest| digest.as_str() == "dummy")
            .times(1)
            .return_once(|_, _| Ok(false));

        let service = PasswordLoginService::new(
            Arc::new(users_returning(None)),
            Arc::new(hasher),
            Arc::new(MockTokenService::new()),
        );
        let err = service
            .login(&credentials("nobody", "sekret"))
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn token_failure_is_internal(root: User) {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .times(1)
            .return_once(|_| Err(TokenError::signing("key rejected")));
        let service = PasswordLoginService::new(
            Arc::new(users_returning(Some(root))),
            Arc::new(FixturePasswordHasher),
            Arc::new(tokens),
        );

        let err = service
            .login(&credentials("root", "sekret"))
            .await
            .expect_err("signing failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}

//! Account registration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{PasswordHasher, RegisterUserRequest, UserRegistration, UserRepository};
use crate::domain::service_support::{map_password_hash_error, map_user_repository_error};
use crate::domain::{Error, Registration, RegistrationPolicy, User, UserId, UserProfile};

/// Registration service implementing the [`UserRegistration`] driving port.
#[derive(Clone)]
pub struct UserRegistrationService<R: ?Sized, H: ?Sized> {
    users: Arc<R>,
    hasher: Arc<H>,
    policy: RegistrationPolicy,
}

impl<R: ?Sized, H: ?Sized> UserRegistrationService<R, H> {
    /// Create a service using the default [`RegistrationPolicy`].
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            policy: RegistrationPolicy::default(),
        }
    }

    /// Replace the registration policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<R: ?Sized, H: ?Sized> UserRegistration for UserRegistrationService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error> {
        let registration = Registration::try_from_parts(
            &request.username,
            &request.name,
            &request.password,
            &self.policy,
        )
        .map_err(|err| {
            let field = err.field();
            Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "field": field }))
        })?;

        let digest = self
            .hasher
            .hash(registration.password())
            .map_err(map_password_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.name(),
            digest,
            Vec::new(),
        );

        self.users
            .create(&user)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %user.id(), username = %user.username(), "registered user");
        Ok(user.profile())
    }
}

//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `UserRegistration`, `UsersQuery`,
//! `BlogsCommand`, `BlogsQuery`, `TestingReset`) are what inbound adapters
//! call. Driven ports (`UserRepository`, `BlogRepository`, `PasswordHasher`,
//! `TokenService`) are what the domain services call out to.

mod macros;
pub(crate) use macros::define_port_error;

mod blog_repository;
mod blogs_command;
mod blogs_query;
mod login_service;
mod password_hasher;
mod testing_reset;
mod token_service;
mod user_registration;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use blog_repository::MockBlogRepository;
pub use blog_repository::{BlogPersistenceError, BlogRepository, FixtureBlogRepository};
pub use blogs_command::BlogsCommand;
#[cfg(test)]
pub use blogs_command::MockBlogsCommand;
pub use blogs_query::BlogsQuery;
#[cfg(test)]
pub use blogs_query::MockBlogsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, LoginSession};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use testing_reset::MockTestingReset;
pub use testing_reset::TestingReset;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegisterUserRequest, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{UserWithBlogs, UsersQuery};

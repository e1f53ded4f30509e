//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BlogsCommand, BlogsQuery, LoginService, TestingReset, UserRegistration, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use bloglist::domain::ports::FixturePasswordHasher;
/// use bloglist::domain::{
///     BlogService, PasswordLoginService, StoreResetService, UserRegistrationService,
///     UsersQueryService,
/// };
/// use bloglist::inbound::http::state::HttpState;
/// use bloglist::outbound::persistence::{InMemoryBlogRepository, InMemoryUserRepository};
/// use bloglist::outbound::security::JwtTokenService;
///
/// let users = Arc::new(InMemoryUserRepository::default());
/// let blogs = Arc::new(InMemoryBlogRepository::default());
/// let hasher = Arc::new(FixturePasswordHasher);
/// let tokens = Arc::new(JwtTokenService::new(b"0123456789abcdef0123456789abcdef", None));
/// let service = Arc::new(BlogService::new(blogs.clone(), users.clone()));
///
/// let state = HttpState {
///     login: Arc::new(PasswordLoginService::new(users.clone(), hasher.clone(), tokens)),
///     registration: Arc::new(UserRegistrationService::new(users.clone(), hasher)),
///     users: Arc::new(UsersQueryService::new(users.clone(), blogs.clone())),
///     blogs: service.clone(),
///     blogs_query: service,
///     reset: Arc::new(StoreResetService::new(blogs, users)),
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Credential exchange for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Account creation for `POST /users`.
    pub registration: Arc<dyn UserRegistration>,
    /// User listing for `GET /users`.
    pub users: Arc<dyn UsersQuery>,
    /// Blog mutations.
    pub blogs: Arc<dyn BlogsCommand>,
    /// Blog reads and statistics.
    pub blogs_query: Arc<dyn BlogsQuery>,
    /// Store wipe behind the opt-in testing routes.
    pub reset: Arc<dyn TestingReset>,
}

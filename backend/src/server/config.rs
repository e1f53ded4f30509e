//! HTTP server configuration object and command-line arguments.

use std::net::SocketAddr;
use std::sync::Arc;

use bloglist::domain::UpdatePolicy;
use bloglist::domain::ports::{BlogRepository, PasswordHasher, TokenService, UserRepository};
use bloglist::outbound::persistence::{InMemoryBlogRepository, InMemoryUserRepository, MongoStore};
use bloglist::outbound::security::Argon2PasswordHasher;
use clap::{ArgAction, Parser};

/// Command-line and environment settings for the server binary.
///
/// Token settings are read separately through
/// [`token_settings_from_env`](bloglist::outbound::security::token_settings_from_env).
#[derive(Parser, Debug, Clone)]
#[command(name = "bloglist", version, about = "Multi-user blog list service")]
pub struct ServerArgs {
    /// Socket address to listen on.
    #[arg(long, env = "BLOGLIST_BIND", default_value = "0.0.0.0:3003")]
    pub bind: SocketAddr,

    /// MongoDB connection string; the in-memory store is used when absent.
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    /// MongoDB database holding the `users` and `blogs` collections.
    #[arg(long, env = "MONGODB_DATABASE", default_value = "bloglist")]
    pub mongodb_database: String,

    /// Who may update blog entries: public, authenticated or owner.
    #[arg(long, env = "BLOG_UPDATE_POLICY", default_value = "public")]
    pub update_policy: UpdatePolicy,

    /// Mount `POST /api/testing/reset`. Never enable in production.
    #[arg(
        long,
        env = "BLOGLIST_ENABLE_TESTING_ROUTES",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub enable_testing_routes: bool,
}

/// Repository pair backing the domain services.
#[derive(Clone)]
pub struct Repositories {
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) blogs: Arc<dyn BlogRepository>,
}

impl Repositories {
    /// Fresh, empty process-local stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            blogs: Arc::new(InMemoryBlogRepository::default()),
        }
    }

    /// Collections of a connected MongoDB store.
    #[must_use]
    pub fn mongo(store: &MongoStore) -> Self {
        Self {
            users: Arc::new(store.users()),
            blogs: Arc::new(store.blogs()),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<dyn TokenService>,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) repositories: Repositories,
    pub(crate) update_policy: UpdatePolicy,
    pub(crate) testing_routes: bool,
}

impl ServerConfig {
    /// Configuration with in-memory stores, Argon2 digests, the public update
    /// policy and no testing routes.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            bind_addr,
            tokens,
            hasher: Arc::new(Argon2PasswordHasher::default()),
            repositories: Repositories::in_memory(),
            update_policy: UpdatePolicy::default(),
            testing_routes: false,
        }
    }

    /// Use `repositories` instead of the in-memory stores.
    #[must_use]
    pub fn with_repositories(mut self, repositories: Repositories) -> Self {
        self.repositories = repositories;
        self
    }

    /// Replace the password hasher.
    #[cfg_attr(
        not(test),
        expect(
            dead_code,
            reason = "Exercised by integration tests that swap in a cheap hasher"
        )
    )]
    #[must_use]
    pub fn with_password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Set who may update blog entries.
    #[must_use]
    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    /// Mount the store reset route used by end-to-end suites.
    #[must_use]
    pub fn with_testing_routes(mut self, enabled: bool) -> Self {
        self.testing_routes = enabled;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

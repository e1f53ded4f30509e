//! Builders wiring repositories and adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use bloglist::domain::ports::{BlogRepository, PasswordHasher, TokenService, UserRepository};
use bloglist::domain::{
    BlogService, PasswordLoginService, StoreResetService, UserRegistrationService,
    UsersQueryService,
};
use bloglist::inbound::http::state::HttpState;

use super::ServerConfig;

type Users = dyn UserRepository;
type Blogs = dyn BlogRepository;

/// Assemble the driving ports from `config`.
///
/// Blog commands and queries share one [`BlogService`] so both observe the
/// configured update policy.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users: Arc<Users> = Arc::clone(&config.repositories.users);
    let blogs: Arc<Blogs> = Arc::clone(&config.repositories.blogs);
    let hasher: Arc<dyn PasswordHasher> = Arc::clone(&config.hasher);
    let tokens: Arc<dyn TokenService> = Arc::clone(&config.tokens);

    let blog_service = Arc::new(
        BlogService::new(Arc::clone(&blogs), Arc::clone(&users))
            .with_update_policy(config.update_policy),
    );

    web::Data::new(HttpState {
        login: Arc::new(PasswordLoginService::new(
            Arc::clone(&users),
            Arc::clone(&hasher),
            tokens,
        )),
        registration: Arc::new(UserRegistrationService::new(Arc::clone(&users), hasher)),
        users: Arc::new(UsersQueryService::new(Arc::clone(&users), Arc::clone(&blogs))),
        blogs: blog_service.clone(),
        blogs_query: blog_service,
        reset: Arc::new(StoreResetService::new(blogs, users)),
    })
}

//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{Repositories, ServerArgs, ServerConfig};
use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use bloglist::domain::ports::TokenService;
use bloglist::inbound::http::blogs::{
    blog_stats, create_blog, delete_blog, get_blog, list_blogs, update_blog,
};
use bloglist::inbound::http::error::{json_error_handler, unknown_endpoint};
use bloglist::inbound::http::health::{HealthState, live, ready};
use bloglist::inbound::http::state::HttpState;
use bloglist::inbound::http::testing::reset_store;
use bloglist::inbound::http::users::{list_users, login, register_user};
use bloglist::{Authenticate, Trace};
#[cfg(debug_assertions)]
use bloglist::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Per-worker inputs for [`build_app`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// Driving ports used by the handlers.
    pub http_state: web::Data<HttpState>,
    /// Verifier for bearer tokens.
    pub tokens: Arc<dyn TokenService>,
    /// Whether `POST /api/testing/reset` is mounted.
    pub testing_routes: bool,
}

/// Build the application: tracing, best-effort authentication, the `/api`
/// scope, health probes and a JSON 404 for everything else.
///
/// `/blogs/stats` is registered before `/blogs/{id}` so it is not captured
/// as an identifier.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        tokens,
        testing_routes,
    } = deps;

    let api = web::scope("/api")
        .service(register_user)
        .service(list_users)
        .service(login)
        .service(list_blogs)
        .service(blog_stats)
        .service(get_blog)
        .service(create_blog)
        .service(delete_blog)
        .service(update_blog);
    let api = if testing_routes {
        api.service(reset_store)
    } else {
        api
    };

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Authenticate::new(tokens))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(unknown_endpoint))
}

/// Resolve the per-worker inputs for [`build_app`] from `config`.
pub fn app_dependencies(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> AppDependencies {
    AppDependencies {
        health_state,
        http_state: build_http_state(config),
        tokens: Arc::clone(&config.tokens),
        testing_routes: config.testing_routes,
    }
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let deps = app_dependencies(health_state.clone(), &config);

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api` and the health probes,
//! the DTO and error schemas, and the bearer token security scheme. The
//! document backs Swagger UI in debug builds and the `openapi-dump` binary.

use crate::inbound::http::blogs::{
    BlogBody, BlogOwnerBody, BlogStatsBody, CreateBlogBody, MostBlogsBody, MostLikesBody,
    UpdateBlogBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    LoginRequest, LoginResponseBody, RegisterUserBody, UserBlogBody, UserBody,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog list API",
        description = "Users register and log in; authenticated users add and delete their own blog entries; anyone may read.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::login,
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::blog_stats,
        crate::inbound::http::blogs::get_blog,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::testing::reset_store,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterUserBody,
        UserBody,
        UserBlogBody,
        LoginRequest,
        LoginResponseBody,
        CreateBlogBody,
        UpdateBlogBody,
        BlogBody,
        BlogOwnerBody,
        BlogStatsBody,
        MostBlogsBody,
        MostLikesBody,
    )),
    tags(
        (name = "users", description = "Registration, login and user listing"),
        (name = "blogs", description = "Blog entries and statistics"),
        (name = "testing", description = "Store reset for end-to-end suites"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

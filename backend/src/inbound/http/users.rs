//! Users API handlers.
//!
//! ```text
//! POST /api/users {"username":"root","name":"Superuser","password":"sekret"}
//! GET /api/users
//! POST /api/login {"username":"root","password":"sekret"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{LoginSession, RegisterUserRequest, UserWithBlogs};
use crate::domain::{Blog, Error, INVALID_CREDENTIALS, LoginCredentials, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/users`.
///
/// Missing fields deserialise as empty strings so the domain reports the
/// length rule rather than a JSON shape error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterUserBody {
    /// Requested unique username, at least three characters.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Plain-text password, at least three characters.
    pub password: String,
}

impl From<RegisterUserBody> for RegisterUserRequest {
    fn from(value: RegisterUserBody) -> Self {
        Self {
            username: value.username,
            name: value.name,
            password: value.password,
        }
    }
}

/// Entry as nested inside a user listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBlogBody {
    /// Identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Entry title.
    pub title: String,
    /// Author credited by the entry.
    pub author: String,
    /// Link to the entry.
    pub url: String,
    /// Like count.
    pub likes: u64,
}

impl From<&Blog> for UserBlogBody {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id().to_string(),
            title: blog.title().to_owned(),
            author: blog.author().to_owned(),
            url: blog.url().to_owned(),
            likes: blog.likes(),
        }
    }
}

/// Public view of a user. Never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    /// Identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Entries this user created, in creation order.
    pub blogs: Vec<UserBlogBody>,
}

impl UserBody {
    fn new(profile: UserProfile, blogs: &[Blog]) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.to_string(),
            name: profile.name,
            blogs: blogs.iter().map(UserBlogBody::from).collect(),
        }
    }
}

impl From<UserWithBlogs> for UserBody {
    fn from(value: UserWithBlogs) -> Self {
        Self::new(value.profile, &value.blogs)
    }
}

/// Login request body for `POST /api/login`.
///
/// Example JSON:
/// `{"username":"root","password":"sekret"}`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseBody {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
}

impl From<LoginSession> for LoginResponseBody {
    fn from(session: LoginSession) -> Self {
        Self {
            token: session.token.into(),
            username: session.profile.username.to_string(),
            name: session.profile.name,
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User created", body = UserBody),
        (status = 400, description = "Invalid or duplicate username, short password", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let profile = state
        .registration
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserBody::new(profile, &[])))
}

/// List users with the entries each one created.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bloglist::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserBody>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserBody::from).collect()))
}

/// Exchange credentials for a bearer token.
///
/// Blank fields, unknown usernames and wrong passwords all produce the same
/// `401` so callers cannot probe which usernames exist.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponseBody),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponseBody>> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;
    let session = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponseBody::from(session)))
}

#[cfg(test)]
mod tests;

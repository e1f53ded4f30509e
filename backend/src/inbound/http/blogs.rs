//! Blog entry HTTP handlers.
//!
//! ```text
//! GET /api/blogs
//! GET /api/blogs/stats
//! GET /api/blogs/{id}
//! POST /api/blogs {"title":"A","author":"B","url":"C"}
//! PUT /api/blogs/{id} {"likes":8}
//! DELETE /api/blogs/{id}
//! ```
//!
//! Reads are public. Writes hand the request's optional identity to the
//! domain, which decides whether it is required.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthorBlogCount, AuthorLikes, BLOG_NOT_FOUND, Blog, BlogChanges, BlogDraft, BlogId, BlogStats,
    BlogView, Error, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::MaybeIdentity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for creating an entry.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBlogBody {
    /// Entry title.
    pub title: String,
    /// Author credited by the entry.
    pub author: String,
    /// Link to the entry.
    pub url: String,
    /// Initial like count; defaults to zero.
    pub likes: Option<u64>,
}

impl From<CreateBlogBody> for BlogDraft {
    fn from(value: CreateBlogBody) -> Self {
        Self {
            title: value.title,
            author: value.author,
            url: value.url,
            likes: value.likes,
        }
    }
}

/// Partial update payload. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBlogBody {
    /// Entry title.
    pub title: Option<String>,
    /// Author credited by the entry.
    pub author: Option<String>,
    /// Link to the entry.
    pub url: Option<String>,
    /// Like count.
    pub likes: Option<u64>,
}

impl From<UpdateBlogBody> for BlogChanges {
    fn from(value: UpdateBlogBody) -> Self {
        Self {
            title: value.title,
            author: value.author,
            url: value.url,
            likes: value.likes,
        }
    }
}

/// Owner summary embedded in entry responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogOwnerBody {
    /// Identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
}

impl From<UserProfile> for BlogOwnerBody {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.to_string(),
            name: profile.name,
        }
    }
}

/// Entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogBody {
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
    /// Creator of the entry; `null` when the account no longer exists.
    pub user: Option<BlogOwnerBody>,
}

impl BlogBody {
    fn from_blog(blog: &Blog, user: Option<BlogOwnerBody>) -> Self {
        Self {
            id: blog.id().to_string(),
            title: blog.title().to_owned(),
            author: blog.author().to_owned(),
            url: blog.url().to_owned(),
            likes: blog.likes(),
            user,
        }
    }
}

impl From<BlogView> for BlogBody {
    fn from(view: BlogView) -> Self {
        Self::from_blog(&view.blog, view.owner.map(BlogOwnerBody::from))
    }
}

/// Author with the most entries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MostBlogsBody {
    /// Author credited by the entry.
    pub author: String,
    /// Number of entries by this author.
    pub blogs: u64,
}

impl From<AuthorBlogCount> for MostBlogsBody {
    fn from(value: AuthorBlogCount) -> Self {
        Self {
            author: value.author,
            blogs: value.blogs,
        }
    }
}

/// Author with the most likes across their entries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MostLikesBody {
    /// Author credited by the entry.
    pub author: String,
    /// Like count.
    pub likes: u64,
}

impl From<AuthorLikes> for MostLikesBody {
    fn from(value: AuthorLikes) -> Self {
        Self {
            author: value.author,
            likes: value.likes,
        }
    }
}

/// Aggregate statistics over every stored entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogStatsBody {
    /// Sum of likes across every entry.
    pub total_likes: u64,
    /// Most-liked entry, without its owner expanded.
    pub favorite_blog: Option<BlogBody>,
    /// Author with the most entries.
    pub most_blogs: Option<MostBlogsBody>,
    /// Author with the most likes in total.
    pub most_likes: Option<MostLikesBody>,
}

impl From<BlogStats> for BlogStatsBody {
    fn from(stats: BlogStats) -> Self {
        Self {
            total_likes: stats.total_likes,
            favorite_blog: stats
                .favorite_blog
                .as_ref()
                .map(|blog| BlogBody::from_blog(blog, None)),
            most_blogs: stats.most_blogs.map(MostBlogsBody::from),
            most_likes: stats.most_likes.map(MostLikesBody::from),
        }
    }
}

/// Ids that do not parse cannot name a stored entry.
fn parse_blog_id(raw: &str) -> Result<BlogId, Error> {
    BlogId::new(raw).map_err(|_| Error::not_found(BLOG_NOT_FOUND))
}

/// List every entry with its owner expanded.
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "Entries", body = [BlogBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "listBlogs",
    security([])
)]
#[get("/blogs")]
pub async fn list_blogs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BlogBody>>> {
    let views = state.blogs_query.list().await?;
    Ok(web::Json(views.into_iter().map(BlogBody::from).collect()))
}

/// Summary statistics: total likes, favourite entry and top authors.
#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    responses(
        (status = 200, description = "Statistics", body = BlogStatsBody),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "blogStats",
    security([])
)]
#[get("/blogs/stats")]
pub async fn blog_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<BlogStatsBody>> {
    let stats = state.blogs_query.stats().await?;
    Ok(web::Json(BlogStatsBody::from(stats)))
}

/// Fetch a single entry.
#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry", body = BlogBody),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "getBlog",
    security([])
)]
#[get("/blogs/{id}")]
pub async fn get_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BlogBody>> {
    let id = parse_blog_id(&path)?;
    let view = state.blogs_query.get(&id).await?;
    Ok(web::Json(BlogBody::from(view)))
}

/// Create an entry owned by the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = CreateBlogBody,
    responses(
        (status = 201, description = "Entry created", body = BlogBody),
        (status = 400, description = "Missing title, author or url", body = ErrorSchema),
        (status = 401, description = "Token missing or invalid", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "createBlog",
    security(("BearerToken" = []))
)]
#[post("/blogs")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    identity: MaybeIdentity,
    payload: web::Json<CreateBlogBody>,
) -> ApiResult<HttpResponse> {
    let view = state
        .blogs
        .create(identity.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(BlogBody::from(view)))
}

/// Delete an entry. Only its creator may do so.
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Entry identifier")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Token missing or invalid", body = ErrorSchema),
        (status = 403, description = "Caller did not create the entry", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "deleteBlog",
    security(("BearerToken" = []))
)]
#[delete("/blogs/{id}")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    identity: MaybeIdentity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    state.blogs.delete(identity.into_inner(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Apply a partial update, typically a like.
///
/// Open to anonymous callers unless a stricter update policy is configured.
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Entry identifier")),
    request_body = UpdateBlogBody,
    responses(
        (status = 200, description = "Updated entry", body = BlogBody),
        (status = 400, description = "Blank replacement field", body = ErrorSchema),
        (status = 401, description = "Token required by policy", body = ErrorSchema),
        (status = 403, description = "Owner required by policy", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "updateBlog",
    security((), ("BearerToken" = []))
)]
#[put("/blogs/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    identity: MaybeIdentity,
    path: web::Path<String>,
    payload: web::Json<UpdateBlogBody>,
) -> ApiResult<web::Json<BlogBody>> {
    let id = parse_blog_id(&path)?;
    let view = state
        .blogs
        .update(identity.into_inner(), &id, payload.into_inner().into())
        .await?;
    Ok(web::Json(BlogBody::from(view)))
}

#[cfg(test)]
#[path = "blogs_tests.rs"]
mod tests;

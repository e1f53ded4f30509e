//! Domain primitives, ports and services.
//!
//! Purpose: define the blog list's entities and the rules around them
//! without any knowledge of HTTP, MongoDB or a particular hashing or token
//! scheme. Adapters live in `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserProfile, Registration: credential records and public views.
//! - Blog, BlogDraft, BlogChanges, BlogView: entries and their mutations.
//! - Identity, LoginCredentials, AuthToken: authentication primitives.
//! - BlogService, UserRegistrationService, PasswordLoginService,
//!   UsersQueryService, StoreResetService: driving port implementations.

pub mod auth;
pub mod blog;
pub mod blog_service;
pub mod blog_stats;
pub mod error;
pub mod login_service;
pub mod ports;
mod service_support;
pub mod testing_reset;
pub mod trace_id;
pub mod user;
pub mod user_registration;
pub mod users_query;

pub use self::auth::{
    AuthToken, Identity, LoginCredentials, LoginValidationError, TOKEN_MISSING_OR_INVALID,
    UnknownUpdatePolicy, UpdatePolicy, bearer_token, extract_identity, require_identity,
};
pub use self::blog::{Blog, BlogChanges, BlogDraft, BlogId, BlogValidationError, BlogView};
pub use self::blog_service::{
    BLOG_NOT_FOUND, BlogService, ONLY_CREATOR_CAN_DELETE, ONLY_CREATOR_CAN_UPDATE,
};
pub use self::blog_stats::{
    AuthorBlogCount, AuthorLikes, BlogStats, favorite_blog, most_blogs, most_likes, total_likes,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login_service::{INVALID_CREDENTIALS, PasswordLoginService};
pub use self::testing_reset::StoreResetService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    PasswordDigest, Registration, RegistrationPolicy, User, UserId, UserProfile,
    UserValidationError, Username,
};
pub use self::user_registration::UserRegistrationService;
pub use self::users_query::UsersQueryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bloglist::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("only creator can delete blog"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

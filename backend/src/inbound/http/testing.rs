//! Store reset endpoint for end-to-end suites.
//!
//! Only mounted when testing routes are enabled at start-up.

use actix_web::{HttpResponse, post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Delete every user and entry.
#[utoipa::path(
    post,
    path = "/api/testing/reset",
    responses(
        (status = 204, description = "Stores emptied"),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["testing"],
    operation_id = "resetStore",
    security([])
)]
#[post("/testing/reset")]
pub async fn reset_store(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state.reset.reset().await?;
    Ok(HttpResponse::NoContent().finish())
}

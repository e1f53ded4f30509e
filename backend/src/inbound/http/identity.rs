//! Extractor exposing the caller's verified identity to handlers.
//!
//! The [`Authenticate`](crate::middleware::Authenticate) middleware stores an
//! [`Identity`] in the request extensions when a bearer token verifies.
//! Handlers take [`MaybeIdentity`] and pass the inner `Option` to the domain,
//! which decides whether an identity is required.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::Identity;

/// Optional identity attached to the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    /// Consume the wrapper.
    pub fn into_inner(self) -> Option<Identity> {
        self.0
    }
}

impl FromRequest for MaybeIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(req.extensions().get::<Identity>().cloned())))
    }
}

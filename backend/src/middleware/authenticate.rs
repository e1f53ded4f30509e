//! Best-effort bearer token authentication.
//!
//! Every request passes through; when its `Authorization` header carries a
//! token that verifies, the recovered [`Identity`] is stored in the request
//! extensions for the [`MaybeIdentity`](crate::inbound::http::identity::MaybeIdentity)
//! extractor. Rejection is left to the operations that need an identity.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage};
use futures_util::future::{Ready, ready};

use crate::domain::ports::TokenService;
use crate::domain::{Identity, extract_identity};

/// Middleware resolving the caller's identity from a bearer token.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use bloglist::Authenticate;
/// use bloglist::outbound::security::JwtTokenService;
///
/// let tokens = Arc::new(JwtTokenService::new(b"0123456789abcdef0123456789abcdef", None));
/// let app = App::new().wrap(Authenticate::new(tokens));
/// ```
#[derive(Clone)]
pub struct Authenticate {
    tokens: Arc<dyn TokenService>,
}

impl Authenticate {
    /// Verify tokens with `tokens`.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service,
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// Service wrapper produced by [`Authenticate`].
pub struct AuthenticateMiddleware<S> {
    service: S,
    tokens: Arc<dyn TokenService>,
}

impl<S> AuthenticateMiddleware<S> {
    fn identify(&self, req: &ServiceRequest) -> Option<Identity> {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        extract_identity(header, self.tokens.as_ref())
    }
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(identity) = self.identify(&req) {
            req.extensions_mut().insert(identity);
        }
        self.service.call(req)
    }
}

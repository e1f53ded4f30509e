//! HS256 JSON Web Tokens carrying a user identity.
//!
//! Claims are `{sub, username, iat}` with `exp` added only when a lifetime is
//! configured. Expiry is checked against the injected [`Clock`] rather than
//! the system time so tests can move time forward.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AuthToken, Identity, UserId, Username};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// [`TokenService`] signing identities with a shared HMAC secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Sign with `secret`; tokens never expire when `ttl` is `None`.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::ports::TokenService;
    /// use bloglist::domain::{Identity, UserId, Username};
    /// use bloglist::outbound::security::JwtTokenService;
    ///
    /// let tokens = JwtTokenService::new(b"0123456789abcdef0123456789abcdef", None);
    /// let identity = Identity {
    ///     user_id: UserId::random(),
    ///     username: Username::from_stored("root"),
    /// };
    /// let token = tokens.issue(&identity).unwrap();
    /// assert_eq!(tokens.verify(token.as_str()).unwrap(), identity);
    /// ```
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Self {
        Self::with_clock(secret, ttl, Arc::new(DefaultClock))
    }

    /// Like [`JwtTokenService::new`] but reading time from `clock`.
    pub fn with_clock(secret: &[u8], ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<AuthToken, TokenError> {
        let iat = self.now();
        let exp = self
            .ttl
            .map(|ttl| {
                i64::try_from(ttl.as_secs())
                    .map(|secs| iat.saturating_add(secs))
                    .map_err(|_| TokenError::signing("token lifetime out of range"))
            })
            .transpose()?;
        let claims = Claims {
            sub: identity.user_id.to_string(),
            username: identity.username.to_string(),
            iat,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AuthToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?
            .claims;
        match (self.ttl, claims.exp) {
            (Some(_), None) => return Err(TokenError::invalid("token carries no expiry")),
            (_, Some(exp)) if exp <= self.now() => {
                return Err(TokenError::invalid("token expired"));
            }
            _ => {}
        }
        let user_id =
            UserId::new(&claims.sub).map_err(|_| TokenError::invalid("subject is not a user id"))?;
        Ok(Identity {
            user_id,
            username: Username::from_stored(claims.username),
        })
    }
}

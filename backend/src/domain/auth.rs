//! Authentication primitives: login credentials, token-derived identities and
//! the guards write paths run before touching storage.
//!
//! Identity is best-effort on the way in ([`extract_identity`]) and mandatory
//! only where an operation asks for it ([`require_identity`]). Reads never
//! consult either.

use std::fmt;
use std::str::FromStr;

use tracing::debug;
use zeroize::Zeroizing;

use super::ports::TokenService;
use super::{Error, UserId, Username};

/// Message returned when a gated operation has no verified identity.
pub const TOKEN_MISSING_OR_INVALID: &str = "token missing or invalid";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use bloglist::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" root ", "sekret").unwrap();
/// assert_eq!(creds.username(), "root");
/// assert_eq!(creds.password(), "sekret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Verified caller identity recovered from an identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Subject of the token.
    pub user_id: UserId,
    /// Username at the time the token was issued.
    pub username: Username,
}

/// Signed identity token handed to clients after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Other schemes and empty tokens
/// yield `None`.
///
/// # Examples
/// ```
/// use bloglist::domain::bearer_token;
///
/// assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
/// assert_eq!(bearer_token("bearer abc.def"), Some("abc.def"));
/// assert_eq!(bearer_token("Basic cm9vdA=="), None);
/// assert_eq!(bearer_token("Bearer "), None);
/// ```
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the caller's identity from an optional `Authorization` header.
///
/// Never fails: a missing header, a foreign scheme or a token that does not
/// verify all produce `None`.
pub fn extract_identity(header: Option<&str>, tokens: &dyn TokenService) -> Option<Identity> {
    let token = bearer_token(header?)?;
    match tokens.verify(token) {
        Ok(identity) => Some(identity),
        Err(err) => {
            debug!(error = %err, "ignoring bearer token that failed verification");
            None
        }
    }
}

/// Demand a verified identity, failing with `Unauthorized` otherwise.
///
/// # Examples
/// ```
/// use bloglist::domain::{ErrorCode, require_identity};
///
/// let err = require_identity(None).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// assert_eq!(err.message(), "token missing or invalid");
/// ```
pub fn require_identity(identity: Option<Identity>) -> Result<Identity, Error> {
    identity.ok_or_else(|| Error::unauthorized(TOKEN_MISSING_OR_INVALID))
}

/// Who may update an existing blog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Anyone may update, matching the public "like" action.
    #[default]
    Public,
    /// Any caller with a verified identity may update.
    Authenticated,
    /// Only the entry's owner may update.
    OwnerOnly,
}

/// Error returned when an update policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown update policy '{0}'; expected public, authenticated or owner")]
pub struct UnknownUpdatePolicy(String);

impl FromStr for UpdatePolicy {
    type Err = UnknownUpdatePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "authenticated" => Ok(Self::Authenticated),
            "owner" | "owner-only" | "owner_only" => Ok(Self::OwnerOnly),
            _ => Err(UnknownUpdatePolicy(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockTokenService, TokenError};
    use rstest::rstest;

    fn identity() -> Identity {
        Identity {
            user_id: UserId::random(),
            username: Username::from_stored("root"),
        }
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("BEARER abc", Some("abc"))]
    #[case("  Bearer   abc  ", Some("abc"))]
    #[case("Bearer", None)]
    #[case("Bearer   ", None)]
    #[case("Token abc", None)]
    #[case("abc", None)]
    fn bearer_token_parsing(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(header), expected);
    }

    #[rstest]
    fn extract_identity_without_header_skips_verification() {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().times(0);
        assert_eq!(extract_identity(None, &tokens), None);
    }

    #[rstest]
    fn extract_identity_returns_verified_identity() {
        let expected = identity();
        let returned = expected.clone();
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .withf(|token| token == "good")
            .times(1)
            .return_once(move |_| Ok(returned));

        assert_eq!(extract_identity(Some("Bearer good"), &tokens), Some(expected));
    }

    #[rstest]
    fn extract_identity_swallows_verification_failure() {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .times(1)
            .return_once(|_| Err(TokenError::invalid("bad signature")));

        assert_eq!(extract_identity(Some("Bearer forged"), &tokens), None);
    }

    #[rstest]
    fn require_identity_passes_identity_through() {
        let expected = identity();
        let got = require_identity(Some(expected.clone())).expect("identity present");
        assert_eq!(got, expected);
    }

    #[rstest]
    fn require_identity_rejects_absent_identity() {
        let err = require_identity(None).expect_err("missing identity");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), TOKEN_MISSING_OR_INVALID);
    }

    #[rstest]
    #[case("public", UpdatePolicy::Public)]
    #[case("Authenticated", UpdatePolicy::Authenticated)]
    #[case("owner", UpdatePolicy::OwnerOnly)]
    #[case(" owner-only ", UpdatePolicy::OwnerOnly)]
    fn update_policy_parses_known_names(#[case] raw: &str, #[case] expected: UpdatePolicy) {
        assert_eq!(raw.parse::<UpdatePolicy>(), Ok(expected));
    }

    #[rstest]
    fn update_policy_rejects_unknown_names() {
        assert!("everyone".parse::<UpdatePolicy>().is_err());
    }

    #[rstest]
    fn auth_token_debug_is_redacted() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiJ9.payload.sig");
        assert!(!format!("{token:?}").contains("eyJ"));
    }
}

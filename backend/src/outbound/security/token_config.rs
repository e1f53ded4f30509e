//! Token signing configuration parsing and validation.
//!
//! The signing secret and optional token lifetime come from the environment,
//! read through [`mockable::Env`] so the rules can be tested in isolation.
//! Release builds insist on an explicit, sufficiently long secret; debug
//! builds fall back to an ephemeral one and warn.

pub mod fingerprint;

use std::path::PathBuf;
use std::time::Duration;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

use super::JwtTokenService;

const SECRET_ENV: &str = "TOKEN_SECRET";
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const TTL_ENV: &str = "TOKEN_TTL_SECONDS";
const SECRET_MIN_LEN: usize = 32;
const TTL_EXPECTED: &str = "a positive number of seconds";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing or weak settings and emit warnings.
    Debug,
    /// Release builds require explicit, valid settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bloglist::outbound::security::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated token settings. The secret is wiped on drop.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    /// Token lifetime; `None` issues tokens without an expiry claim.
    pub ttl: Option<Duration>,
}

impl TokenSettings {
    /// Build the token service these settings describe.
    pub fn token_service(&self) -> JwtTokenService {
        JwtTokenService::new(&self.secret, self.ttl)
    }

    /// Truncated SHA-256 fingerprint of the active secret.
    pub fn fingerprint(&self) -> String {
        fingerprint::secret_fingerprint(&self.secret)
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        origin: String,
        length: usize,
        min_len: usize,
    },
}

/// Build token settings from environment variables and build mode.
///
/// `TOKEN_SECRET` takes precedence over `TOKEN_SECRET_FILE`.
///
/// # Examples
///
/// ```rust
/// use bloglist::outbound::security::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "TOKEN_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "TOKEN_TTL_SECONDS" => Some("3600".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.ttl, Some(std::time::Duration::from_secs(3600)));
/// assert_eq!(settings.fingerprint().len(), 16);
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let ttl = ttl_from_env(env, mode)?;
    let secret = secret_from_env(env, mode)?;
    Ok(TokenSettings { secret, ttl })
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Option<Duration>, TokenConfigError> {
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_TTL_SECONDS; tokens will not expire");
            Ok(None)
        }
        _ => Err(TokenConfigError::InvalidEnv {
            name: TTL_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    if let Some(secret) = env.string(SECRET_ENV).filter(|s| !s.is_empty()) {
        return check_length(Zeroizing::new(secret.into_bytes()), SECRET_ENV, mode);
    }

    let Some(path) = env.string(SECRET_FILE_ENV).map(PathBuf::from) else {
        if mode.is_debug() {
            warn!("TOKEN_SECRET not set; using temporary token secret (dev only)");
            return Ok(ephemeral_secret());
        }
        return Err(TokenConfigError::MissingEnv { name: SECRET_ENV });
    };

    match std::fs::read(&path) {
        Ok(bytes) => check_length(Zeroizing::new(bytes), &path.display().to_string(), mode),
        Err(error) => {
            if mode.is_debug() {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                Ok(ephemeral_secret())
            } else {
                Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn check_length(
    mut secret: Zeroizing<Vec<u8>>,
    origin: &str,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let length = secret.len();
    if length >= SECRET_MIN_LEN {
        return Ok(secret);
    }
    if mode.is_debug() {
        warn!(origin, length, "token secret shorter than {SECRET_MIN_LEN} bytes");
        return Ok(secret);
    }
    secret.zeroize();
    Err(TokenConfigError::SecretTooShort {
        origin: origin.to_owned(),
        length,
        min_len: SECRET_MIN_LEN,
    })
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; SECRET_MIN_LEN]);
    OsRng.fill_bytes(&mut bytes);
    bytes
}

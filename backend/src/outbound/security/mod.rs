//! Credential and token adapters.
//!
//! - [`Argon2PasswordHasher`] implements the password digest port.
//! - [`JwtTokenService`] implements the identity token port.
//! - [`token_settings_from_env`] loads the signing secret and lifetime.

mod argon2_hasher;
mod jwt_token_service;
mod token_config;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_token_service::JwtTokenService;
pub use token_config::{
    BuildMode, TokenConfigError, TokenSettings, fingerprint, token_settings_from_env,
};

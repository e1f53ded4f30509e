//! User data model.
//!
//! [`User`] is the stored credential record and deliberately carries no
//! `Serialize` implementation: outward views go through [`UserProfile`], which
//! has no digest field at all.

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroizing;

use super::BlogId;

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// User identifier was empty.
    EmptyId,
    /// User identifier was not a UUID.
    InvalidId,
    /// Username, once trimmed, is shorter than the policy allows.
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Password is shorter than the policy allows.
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters long")
            }
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters long")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

impl UserValidationError {
    /// Name of the request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::UsernameTooShort { .. } => "username",
            Self::PasswordTooShort { .. } => "password",
        }
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self::from_uuid(parsed))
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Minimum lengths enforced at registration.
///
/// Lengths count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Shortest accepted username.
    pub min_username_length: usize,
    /// Shortest accepted password.
    pub min_password_length: usize,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            min_password_length: 3,
        }
    }
}

/// Unique login handle chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate a username against the registration policy.
    ///
    /// Surrounding whitespace is trimmed before the length check, matching
    /// how [`LoginCredentials`](crate::domain::LoginCredentials) normalises
    /// the name at login.
    pub fn new(
        username: &str,
        policy: &RegistrationPolicy,
    ) -> Result<Self, UserValidationError> {
        let trimmed = username.trim();
        if trimmed.chars().count() < policy.min_username_length {
            return Err(UserValidationError::UsernameTooShort {
                min: policy.min_username_length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Rehydrate a username read back from storage.
    ///
    /// Stored records were validated when they were written.
    pub fn from_stored(username: impl Into<String>) -> Self {
        Self(username.into())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// One-way password digest produced by a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded digest string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded digest, for adapters that persist or verify it.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Validated registration request.
///
/// # Examples
/// ```
/// use bloglist::domain::{Registration, RegistrationPolicy};
///
/// let policy = RegistrationPolicy::default();
/// let reg = Registration::try_from_parts("root", "Superuser", "sekret", &policy).unwrap();
/// assert_eq!(reg.username().as_ref(), "root");
/// assert!(Registration::try_from_parts("ro", "Superuser", "sekret", &policy).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    name: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration inputs against `policy`.
    pub fn try_from_parts(
        username: &str,
        name: &str,
        password: &str,
        policy: &RegistrationPolicy,
    ) -> Result<Self, UserValidationError> {
        let username = Username::new(username, policy)?;
        if password.chars().count() < policy.min_password_length {
            return Err(UserValidationError::PasswordTooShort {
                min: policy.min_password_length,
            });
        }
        Ok(Self {
            username,
            name: name.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Plain-text password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Stored user record including the password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    name: String,
    password_digest: PasswordDigest,
    blogs: Vec<BlogId>,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(
        id: UserId,
        username: Username,
        name: impl Into<String>,
        password_digest: PasswordDigest,
        blogs: Vec<BlogId>,
    ) -> Self {
        Self {
            id,
            username,
            name: name.into(),
            password_digest,
            blogs,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Stored password digest.
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Blogs created by this user, oldest first.
    pub fn blogs(&self) -> &[BlogId] {
        self.blogs.as_slice()
    }

    /// Record `blog` as created by this user.
    pub fn record_blog(&mut self, blog: BlogId) {
        self.blogs.push(blog);
    }

    /// Public view without credentials.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// Public view of a user, safe to embed in responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Stable user identifier.
    pub id: UserId,
    /// Unique login handle.
    pub username: Username,
    /// Display name.
    pub name: String,
}

#[cfg(test)]
mod tests;

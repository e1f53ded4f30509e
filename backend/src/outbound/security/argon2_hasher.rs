//! Argon2id password digests in PHC string form.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] backed by Argon2id with a fresh random salt per digest.
///
/// Digests are self-describing PHC strings, so parameters can change without
/// invalidating stored records.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordDigest::new(digest.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::default()
    }

    #[rstest]
    fn digest_is_phc_and_hides_password(hasher: Argon2PasswordHasher) {
        let digest = hasher.hash("sekret").expect("hash");
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(!digest.as_str().contains("sekret"));
    }

    #[rstest]
    fn salts_differ_between_digests(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("sekret").expect("hash");
        let second = hasher.hash("sekret").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("sekret", true)]
    #[case("Sekret", false)]
    #[case("", false)]
    fn verifies_candidates(
        hasher: Argon2PasswordHasher,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let digest = hasher.hash("sekret").expect("hash");
        assert_eq!(hasher.verify(candidate, &digest), Ok(expected));
    }

    #[rstest]
    fn malformed_digest_is_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("sekret", &PasswordDigest::new("plain$sekret"))
            .expect_err("not a PHC string");
        assert!(matches!(err, PasswordHashError::MalformedDigest { .. }));
    }
}

//! Token secret fingerprinting for operational visibility.
//!
//! Operators compare fingerprints across instances to confirm they share a
//! secret without the secret itself reaching the logs.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the secret's SHA-256 digest as 16 hex characters.
///
/// # Examples
///
/// ```rust
/// use bloglist::outbound::security::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"0123456789abcdef0123456789abcdef");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    let truncated: Vec<u8> = hasher
        .finalize()
        .into_iter()
        .take(FINGERPRINT_BYTES)
        .collect();
    hex::encode(truncated)
}

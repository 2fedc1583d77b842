//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module derives encryption keys from passphrases using PBKDF2 with
//! a SHA-256 core. The iteration count is a wire-compatibility constant:
//! changing it produces different keys and orphans existing ciphertext.

use pbkdf2::pbkdf2_hmac_array;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{KeepsakeError, Result};

/// PBKDF2 iteration count.
///
/// Every device that has ever encrypted an entry used this exact count;
/// the same (passphrase, salt) pair must keep producing the same key.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// Minimum accepted salt length in bytes.
const MIN_SALT_LENGTH: usize = 16;

/// A symmetric encryption key derived from a passphrase.
///
/// Key material lives only in memory and is zeroized when dropped. The
/// type has no serde implementations on purpose: a derived key must never
/// be persisted or transmitted.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase using PBKDF2-HMAC-SHA256.
///
/// # Arguments
///
/// * `passphrase` - The passphrase to derive from. Any string is accepted,
///   including the empty string: whether an empty passphrase means "no key"
///   is an interface policy that belongs to the session layer, not here.
/// * `salt` - Random salt (at least 16 bytes; reuse the same salt on a
///   device or previously encrypted content becomes undecryptable)
///
/// # Returns
///
/// Returns a `DerivedKey` suitable for authenticated encryption.
///
/// # Errors
///
/// Returns `KeepsakeError::KeyDerivation` if the salt is shorter than
/// 16 bytes.
///
/// # Security
///
/// - Same passphrase + salt always produces the same key (deterministic)
/// - Different salt produces a different key (salt must be stored durably)
/// - 100,000 iterations make offline brute-force expensive
///
/// # Examples
///
/// ```
/// use keepsake_core::crypto::derive_key;
///
/// let salt = b"sixteen-byte-salt";
/// let key = derive_key("my-passphrase", salt).unwrap();
/// // Use key for encryption...
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<DerivedKey> {
    if salt.len() < MIN_SALT_LENGTH {
        return Err(KeepsakeError::KeyDerivation(format!(
            "Salt must be at least {} bytes (got {})",
            MIN_SALT_LENGTH,
            salt.len()
        )));
    }

    let key_bytes =
        pbkdf2_hmac_array::<Sha256, KEY_LENGTH>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS);

    Ok(DerivedKey::from_bytes(key_bytes))
}

//! Salt generation and durable provisioning.
//!
//! A device gets exactly one salt, generated on first use and persisted
//! forever after. Losing or replacing the salt orphans every ciphertext
//! produced under it, so the provisioning path is write-if-absent and a
//! corrupt stored value is an error, never a trigger to regenerate.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{KeepsakeError, Result};
use crate::storage::KeyValueStore;

/// Salt size in bytes.
pub const SALT_LENGTH: usize = 16;

/// Key under which the device salt is persisted in a [`KeyValueStore`].
pub const SALT_STORAGE_KEY: &str = "encryptionSalt";

/// A key-derivation salt.
///
/// Salts are not secret: they are stored in the clear next to the data they
/// protect. Their job is uniqueness per device, which is why they come from
/// the OS CSPRNG and are never reused across installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Generate a fresh random salt from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap raw bytes as a salt.
    pub fn from_bytes(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }

    /// Render the salt as standard padded base64, the stored form.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Parse a salt from its stored base64 form.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::KeyDerivation` if the input is not valid
    /// base64 or does not decode to exactly 16 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD.decode(encoded).map_err(|_| {
            KeepsakeError::KeyDerivation("Stored salt is not valid base64".to_string())
        })?;

        let bytes: [u8; SALT_LENGTH] = bytes.try_into().map_err(|v: Vec<u8>| {
            KeepsakeError::KeyDerivation(format!(
                "Stored salt must be {} bytes (got {})",
                SALT_LENGTH,
                v.len()
            ))
        })?;

        Ok(Self(bytes))
    }
}

/// Load the device salt, creating and persisting one on first use.
///
/// # Arguments
///
/// * `store` - The durable key-value store holding device-local values
///
/// # Returns
///
/// The salt now in effect for this device. Concurrent first runs against a
/// shared store can race; last write wins.
///
/// # Errors
///
/// Returns `KeepsakeError::KeyDerivation` if a stored value exists but
/// cannot be parsed. The corrupt value is left in place: overwriting it
/// with a fresh salt would silently orphan all existing ciphertext, and
/// recovery is an operator decision.
pub fn load_or_create_salt<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Salt> {
    if let Some(stored) = store.get(SALT_STORAGE_KEY)? {
        let salt = Salt::from_base64(&stored)?;
        log::debug!("Reusing existing device salt");
        return Ok(salt);
    }

    let salt = Salt::generate();
    store.set(SALT_STORAGE_KEY, &salt.to_base64())?;
    log::info!("Provisioned new device salt");
    Ok(salt)
}

/// Load the device salt without provisioning one.
///
/// Callers that need to distinguish "first run" from "salt lost but data
/// exists" use this and inspect the `None` themselves.
///
/// # Errors
///
/// Returns `KeepsakeError::KeyDerivation` if a stored value exists but
/// cannot be parsed.
pub fn load_salt<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Salt>> {
    match store.get(SALT_STORAGE_KEY)? {
        Some(stored) => Salt::from_base64(&stored).map(Some),
        None => Ok(None),
    }
}

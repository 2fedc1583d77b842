//! Encrypted values in the device key-value store.
//!
//! Small sensitive values (drafts, preferences worth hiding) live next to
//! the salt in the device store, sealed under the session key. The salt's
//! own storage key is reserved: a protected value is always ciphertext, and
//! the salt must never be, or the device could not derive its way back in.

use crate::crypto::SALT_STORAGE_KEY;
use crate::error::{KeepsakeError, Result};
use crate::session::KeySession;
use crate::storage::KeyValueStore;

fn reject_reserved(name: &str) -> Result<()> {
    if name == SALT_STORAGE_KEY {
        return Err(KeepsakeError::InvalidInput(format!(
            "\"{}\" is reserved for the device salt",
            SALT_STORAGE_KEY
        )));
    }
    Ok(())
}

/// Seal `value` under the session key and store it as `name`.
///
/// # Errors
///
/// - `KeepsakeError::InvalidInput` if `name` is the reserved salt key
/// - `KeepsakeError::KeyUnavailable` if the session holds no key
/// - `KeepsakeError::Storage` if the store rejects the write
pub fn set_protected_value<S: KeyValueStore + ?Sized>(
    store: &mut S,
    session: &KeySession,
    name: &str,
    value: &str,
) -> Result<()> {
    reject_reserved(name)?;
    let sealed = session.encrypt(value)?;
    store.set(name, &sealed)
}

/// Fetch and open the protected value stored as `name`.
///
/// # Returns
///
/// `Ok(None)` when nothing is stored under `name`.
///
/// # Errors
///
/// - `KeepsakeError::InvalidInput` if `name` is the reserved salt key
/// - `KeepsakeError::KeyUnavailable` if the session holds no key
/// - `KeepsakeError::Decryption` if a value is present but will not open
pub fn get_protected_value<S: KeyValueStore + ?Sized>(
    store: &S,
    session: &KeySession,
    name: &str,
) -> Result<Option<String>> {
    reject_reserved(name)?;
    match store.get(name)? {
        Some(sealed) => session.decrypt(&sealed).map(Some),
        None => Ok(None),
    }
}

/// Remove the protected value stored as `name`, if any.
///
/// Needs no key; the sealed value is discarded as-is.
///
/// # Errors
///
/// Returns `KeepsakeError::InvalidInput` if `name` is the reserved salt key.
pub fn remove_protected_value<S: KeyValueStore + ?Sized>(
    store: &mut S,
    name: &str,
) -> Result<()> {
    reject_reserved(name)?;
    store.remove(name)
}

//! Passphrase session and key lifecycle.
//!
//! A `KeySession` turns a passphrase into a usable encryption key and holds
//! it in memory for the life of the session. The passphrase itself is never
//! stored; only the derived key is, and it is zeroized when the session is
//! cleared or dropped.
//!
//! ## States
//!
//! - `NoKey`: nothing usable; sealing operations fail with `KeyUnavailable`
//! - `Deriving`: a derivation is in flight
//! - `Ready`: a key is held and sealing operations work
//!
//! An empty passphrase is a deliberate "no key" request, not an error: the
//! session clears and settles in `NoKey`.

use secrecy::{ExposeSecret, SecretString};

use crate::crypto::{self, DerivedKey, EncodedCiphertext, Salt};
use crate::error::{KeepsakeError, Result};

/// Where the session currently stands in the key lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    /// No key is held
    #[default]
    NoKey,
    /// A derivation is in flight
    Deriving,
    /// A key is held and ready for use
    Ready,
}

/// Holds the derived key for the current passphrase session.
///
/// Invariant: a key is held if and only if the state is `Ready`, and the
/// salt it was derived with is held alongside it.
#[derive(Debug, Default)]
pub struct KeySession {
    key: Option<DerivedKey>,
    salt: Option<Salt>,
    state: KeyState,
}

impl KeySession {
    /// Create a session with no key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive and install the key for `passphrase` under `salt`.
    ///
    /// An empty passphrase clears the session and settles in `NoKey`; that
    /// is a successful outcome, not an error. Calling this again with a new
    /// passphrase re-derives and replaces the held key; anything the caller
    /// decrypted under the old key is theirs to discard.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::KeyDerivation` if derivation fails, in which
    /// case the session is left in `NoKey` with no key material held.
    pub fn set_passphrase(&mut self, passphrase: &SecretString, salt: &Salt) -> Result<()> {
        if passphrase.expose_secret().is_empty() {
            self.clear();
            return Ok(());
        }

        self.state = KeyState::Deriving;
        match crypto::derive_key(passphrase.expose_secret(), salt.as_bytes()) {
            Ok(key) => {
                self.key = Some(key);
                self.salt = Some(salt.clone());
                self.state = KeyState::Ready;
                log::debug!("Key session ready");
                Ok(())
            }
            Err(e) => {
                self.key = None;
                self.salt = None;
                self.state = KeyState::NoKey;
                Err(e)
            }
        }
    }

    /// Drop the held key material and return to `NoKey`.
    pub fn clear(&mut self) {
        self.key = None;
        self.salt = None;
        self.state = KeyState::NoKey;
        log::debug!("Key session cleared");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> KeyState {
        self.state
    }

    /// Whether sealing operations will succeed.
    pub fn is_ready(&self) -> bool {
        self.state == KeyState::Ready
    }

    /// The salt the held key was derived with, when `Ready`.
    pub fn salt(&self) -> Option<&Salt> {
        self.salt.as_ref()
    }

    /// Seal plaintext under the session key, returning the encoded form.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::KeyUnavailable` outside `Ready` and
    /// `KeepsakeError::Encryption` if sealing itself fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let key = self.key.as_ref().ok_or(KeepsakeError::KeyUnavailable)?;
        Ok(crypto::encrypt(plaintext, key)?.encode())
    }

    /// Open an encoded payload sealed under the session key.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::KeyUnavailable` outside `Ready` and
    /// `KeepsakeError::Decryption` for any parse or verification failure.
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let key = self.key.as_ref().ok_or(KeepsakeError::KeyUnavailable)?;
        let parsed = EncodedCiphertext::decode(encoded)?;
        crypto::decrypt(&parsed, key)
    }
}

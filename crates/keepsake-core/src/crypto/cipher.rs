//! Authenticated encryption using AES-256-GCM.
//!
//! Every encryption call draws a fresh random nonce from the OS CSPRNG, so
//! encrypting the same plaintext twice yields different ciphertext. The
//! encoded form is `base64(nonce) ":" base64(ciphertext)` with the standard
//! padded alphabet; that exact layout is what existing stored entries use,
//! so it must never change shape.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::crypto::key::DerivedKey;
use crate::error::{KeepsakeError, Result};

/// Nonce size for AES-GCM (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// Authentication tag size appended to the ciphertext by AES-GCM (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Separator between the nonce and ciphertext segments of the encoded form.
const WIRE_SEPARATOR: char = ':';

/// An encrypted payload in its transportable form.
///
/// Both fields hold standard padded base64. The struct exists so callers can
/// move sealed content around without re-parsing the wire string; `encode`
/// and `decode` convert to and from the stored representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCiphertext {
    /// Base64-encoded 12-byte nonce
    pub nonce: String,
    /// Base64-encoded ciphertext with the 16-byte tag appended
    pub ciphertext: String,
}

impl EncodedCiphertext {
    /// Render the wire form: `"<nonce_b64>:<ciphertext_b64>"`.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.nonce, WIRE_SEPARATOR, self.ciphertext)
    }

    /// Parse the wire form produced by [`encode`](Self::encode).
    ///
    /// Splits on the first `:` and requires both segments to be non-empty.
    /// The segments are not base64-decoded here; malformed base64 surfaces
    /// from [`decrypt`] instead.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Decryption` if the separator is missing or
    /// either segment is empty. The error deliberately carries no detail.
    pub fn decode(encoded: &str) -> Result<Self> {
        let mut parts = encoded.splitn(2, WIRE_SEPARATOR);
        let nonce = parts.next().unwrap_or_default();
        let ciphertext = parts.next().ok_or(KeepsakeError::Decryption)?;

        if nonce.is_empty() || ciphertext.is_empty() {
            return Err(KeepsakeError::Decryption);
        }

        Ok(Self {
            nonce: nonce.to_string(),
            ciphertext: ciphertext.to_string(),
        })
    }
}

/// Encrypt plaintext with AES-256-GCM under a fresh random nonce.
///
/// # Arguments
///
/// * `plaintext` - The content to seal. The empty string is a valid input
///   (the output is then just the authentication tag).
/// * `key` - A key derived via [`derive_key`](crate::crypto::derive_key)
///
/// # Returns
///
/// The sealed payload. The ciphertext segment is `plaintext.len() +`
/// [`TAG_LENGTH`] bytes before base64 expansion.
///
/// # Errors
///
/// Returns `KeepsakeError::Encryption` if the AEAD rejects the input. On
/// error nothing is produced, so a caller can never end up persisting a
/// half-sealed payload.
///
/// # Examples
///
/// ```
/// use keepsake_core::crypto::{decrypt, derive_key, encrypt};
///
/// let key = derive_key("my-passphrase", b"sixteen-byte-salt").unwrap();
/// let sealed = encrypt("Dear diary", &key).unwrap();
/// assert_eq!(decrypt(&sealed, &key).unwrap(), "Dear diary");
/// ```
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> Result<EncodedCiphertext> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| KeepsakeError::Encryption(format!("Invalid key length: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| KeepsakeError::Encryption(format!("AES-GCM encryption failed: {}", e)))?;

    Ok(EncodedCiphertext {
        nonce: STANDARD.encode(nonce_bytes),
        ciphertext: STANDARD.encode(&ciphertext),
    })
}

/// Decrypt a sealed payload and verify its authentication tag.
///
/// # Arguments
///
/// * `encoded` - A payload produced by [`encrypt`] (possibly round-tripped
///   through [`EncodedCiphertext::encode`]/[`decode`](EncodedCiphertext::decode))
/// * `key` - The key the payload was sealed under
///
/// # Errors
///
/// Returns `KeepsakeError::Decryption` for every failure mode: bad base64,
/// wrong nonce length, tag mismatch (wrong key or tampered data), or
/// non-UTF-8 plaintext. Collapsing the causes keeps error messages from
/// acting as a padding/format oracle.
pub fn decrypt(encoded: &EncodedCiphertext, key: &DerivedKey) -> Result<String> {
    let nonce_bytes = STANDARD
        .decode(&encoded.nonce)
        .map_err(|_| KeepsakeError::Decryption)?;

    if nonce_bytes.len() != NONCE_LENGTH {
        return Err(KeepsakeError::Decryption);
    }

    let ciphertext = STANDARD
        .decode(&encoded.ciphertext)
        .map_err(|_| KeepsakeError::Decryption)?;

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| KeepsakeError::Decryption)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| KeepsakeError::Decryption)?;

    String::from_utf8(plaintext).map_err(|_| KeepsakeError::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key::derive_key;
    use std::collections::HashSet;

    fn test_key() -> DerivedKey {
        derive_key("test-passphrase", b"salt-1234567890123456").unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = test_key();
        let plaintext = "Today I finally fixed that bug.";

        let sealed = encrypt(plaintext, &key).unwrap();
        let opened = decrypt(&sealed, &key).unwrap();

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let key = test_key();

        let sealed = encrypt("", &key).unwrap();
        // Ciphertext is just the tag
        assert_eq!(
            STANDARD.decode(&sealed.ciphertext).unwrap().len(),
            TAG_LENGTH
        );
        assert_eq!(decrypt(&sealed, &key).unwrap(), "");
    }

    #[test]
    fn test_unicode_round_trip() {
        let key = test_key();
        let plaintext = "Couldn't sleep — 3am thoughts: 日記 📓";

        let sealed = encrypt(plaintext, &key).unwrap();
        assert_eq!(decrypt(&sealed, &key).unwrap(), plaintext);
    }

    #[test]
    fn test_nonce_is_twelve_bytes() {
        let key = test_key();
        let sealed = encrypt("content", &key).unwrap();

        let nonce = STANDARD.decode(&sealed.nonce).unwrap();
        assert_eq!(nonce.len(), NONCE_LENGTH);
    }

    #[test]
    fn test_same_plaintext_different_ciphertext() {
        let key = test_key();

        let first = encrypt("identical content", &key).unwrap();
        let second = encrypt("identical content", &key).unwrap();

        // Fresh nonce per call means nothing repeats
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_nonces_unique_across_many_calls() {
        let key = test_key();
        let mut seen = HashSet::new();

        for _ in 0..1000 {
            let sealed = encrypt("x", &key).unwrap();
            assert!(seen.insert(sealed.nonce), "nonce repeated");
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = test_key();
        let wrong_key = derive_key("wrong-passphrase", b"salt-1234567890123456").unwrap();

        let sealed = encrypt("secret content", &key).unwrap();
        let result = decrypt(&sealed, &wrong_key);

        assert!(matches!(result, Err(KeepsakeError::Decryption)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = test_key();
        let sealed = encrypt("secret content", &key).unwrap();

        // Flip one bit in the raw ciphertext
        let mut raw = STANDARD.decode(&sealed.ciphertext).unwrap();
        raw[0] ^= 0x01;
        let tampered = EncodedCiphertext {
            nonce: sealed.nonce.clone(),
            ciphertext: STANDARD.encode(&raw),
        };

        assert!(matches!(
            decrypt(&tampered, &key),
            Err(KeepsakeError::Decryption)
        ));
    }

    #[test]
    fn test_tampered_nonce_fails() {
        let key = test_key();
        let sealed = encrypt("secret content", &key).unwrap();

        let mut raw = STANDARD.decode(&sealed.nonce).unwrap();
        raw[0] ^= 0x01;
        let tampered = EncodedCiphertext {
            nonce: STANDARD.encode(&raw),
            ciphertext: sealed.ciphertext.clone(),
        };

        assert!(matches!(
            decrypt(&tampered, &key),
            Err(KeepsakeError::Decryption)
        ));
    }

    #[test]
    fn test_wrong_nonce_length_fails() {
        let key = test_key();
        let sealed = encrypt("secret content", &key).unwrap();

        let short = EncodedCiphertext {
            nonce: STANDARD.encode(b"short"),
            ciphertext: sealed.ciphertext.clone(),
        };

        assert!(matches!(
            decrypt(&short, &key),
            Err(KeepsakeError::Decryption)
        ));
    }

    #[test]
    fn test_bad_base64_fails() {
        let key = test_key();

        let garbage = EncodedCiphertext {
            nonce: "not base64!!!".to_string(),
            ciphertext: "also not base64!!!".to_string(),
        };

        assert!(matches!(
            decrypt(&garbage, &key),
            Err(KeepsakeError::Decryption)
        ));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let key = test_key();
        let sealed = encrypt("wire format", &key).unwrap();

        let wire = sealed.encode();
        assert!(wire.contains(':'));

        let parsed = EncodedCiphertext::decode(&wire).unwrap();
        assert_eq!(parsed, sealed);
        assert_eq!(decrypt(&parsed, &key).unwrap(), "wire format");
    }

    #[test]
    fn test_wire_form_is_base64_colon_base64() {
        let key = test_key();
        let wire = encrypt("Today was good.", &key).unwrap().encode();

        let (nonce, ciphertext) = wire.split_once(':').unwrap();
        let is_standard_base64 = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=')
        };
        assert!(is_standard_base64(nonce));
        assert!(is_standard_base64(ciphertext));
    }

    #[test]
    fn test_decode_splits_on_first_separator() {
        // Standard base64 never contains ':', but the parser must still
        // treat everything after the first one as the ciphertext segment.
        let parsed = EncodedCiphertext::decode("AAAA:BB:CC").unwrap();
        assert_eq!(parsed.nonce, "AAAA");
        assert_eq!(parsed.ciphertext, "BB:CC");
    }

    #[test]
    fn test_decode_rejects_missing_separator() {
        assert!(matches!(
            EncodedCiphertext::decode("nocolonhere"),
            Err(KeepsakeError::Decryption)
        ));
    }

    #[test]
    fn test_decode_rejects_empty_segments() {
        assert!(matches!(
            EncodedCiphertext::decode(":ciphertext"),
            Err(KeepsakeError::Decryption)
        ));
        assert!(matches!(
            EncodedCiphertext::decode("nonce:"),
            Err(KeepsakeError::Decryption)
        ));
        assert!(matches!(
            EncodedCiphertext::decode(":"),
            Err(KeepsakeError::Decryption)
        ));
    }
}

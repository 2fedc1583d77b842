//! Cryptographic primitives for sealing journal content.
//!
//! The scheme is deliberately boring: PBKDF2-HMAC-SHA256 (100,000
//! iterations) turns a passphrase and a per-device salt into a 32-byte key,
//! and AES-256-GCM seals each entry under a fresh 12-byte nonce. The
//! parameters are frozen; entries written years ago must keep decrypting.

pub mod cipher;
pub mod key;
pub mod salt;

pub use cipher::{decrypt, encrypt, EncodedCiphertext, NONCE_LENGTH, TAG_LENGTH};
pub use key::{derive_key, DerivedKey, KEY_LENGTH, PBKDF2_ITERATIONS};
pub use salt::{load_or_create_salt, load_salt, Salt, SALT_LENGTH, SALT_STORAGE_KEY};

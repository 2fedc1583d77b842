//! Error types for Keepsake core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; host applications map them
//! to user-facing messages.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for Keepsake operations.
pub type Result<T> = std::result::Result<T, KeepsakeError>;

/// Core error type for Keepsake operations.
#[derive(Debug, Error)]
pub enum KeepsakeError {
    /// Key derivation failed (malformed salt, bad parameters)
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Decryption failed.
    ///
    /// Deliberately carries no cause: malformed encoding, a wrong key,
    /// a failed integrity check, and length anomalies are all reported
    /// identically so the error cannot be used as a decryption oracle.
    #[error("Decryption failed")]
    Decryption,

    /// Encryption failed while producing ciphertext
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// An encrypt/decrypt operation was attempted without a ready key
    #[error("No usable encryption key; enter a passphrase first")]
    KeyUnavailable,

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entry not found by ID
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decryption_error_reveals_no_cause() {
        let message = KeepsakeError::Decryption.to_string();
        assert_eq!(message, "Decryption failed");
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: KeepsakeError = io_err.into();
        assert!(matches!(err, KeepsakeError::Io { .. }));
    }

    #[test]
    fn test_entry_not_found_includes_id() {
        let id = Uuid::new_v4();
        let message = KeepsakeError::EntryNotFound(id).to_string();
        assert!(message.contains(&id.to_string()));
    }
}

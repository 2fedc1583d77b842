//! # Keepsake Core
//!
//! Core library for Keepsake - a private journal whose entries are encrypted
//! on the writing side, before anything reaches storage.
//!
//! This crate provides the encryption scheme, the passphrase session, and the
//! journal domain logic independent of any user interface or storage host.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, authenticated encryption, salt lifecycle
//! - **session**: passphrase-to-key state machine holding the derived key
//! - **journal**: sealed writes and per-entry tolerant reads
//! - **protected**: encrypted values in the device key-value store
//! - **storage**: persistence traits and reference backends
//! - **analytics**: mood aggregates over decrypted entries
//! - **dates**: human-facing date presentation
//!
//! ## Security Model
//!
//! - Entry content is encrypted with AES-256-GCM before any store call
//! - Keys come from PBKDF2-HMAC-SHA256 over a passphrase and a per-device salt
//! - Stores only ever see ciphertext; a hostile store can deny data, not read it
//! - Decryption failures are opaque: one error, no cause breakdown

pub mod analytics;
pub mod crypto;
pub mod dates;
pub mod error;
pub mod journal;
pub mod protected;
pub mod session;
pub mod storage;

pub use error::{KeepsakeError, Result};
pub use journal::{EntryDraft, Journal, JournalEntry, DECRYPTION_FAILED_PLACEHOLDER};
pub use session::{KeySession, KeyState};
pub use storage::Mood;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

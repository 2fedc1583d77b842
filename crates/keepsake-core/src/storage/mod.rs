//! Storage abstraction for journal persistence.
//!
//! This module defines the `KeyValueStore` and `EntryStore` traits plus the
//! record types that cross them.
//!
//! ## Architecture
//!
//! The storage layer is backend-agnostic:
//! - `MemoryKeyValueStore` / `MemoryEntryStore`: in-memory reference
//!   implementations, used heavily in tests
//! - `FileKeyValueStore`: JSON file with atomic writes, the durable salt
//!   store on desktop hosts
//! - Future: browser local-storage adapters, server-side databases
//!
//! ## Security
//!
//! Everything crossing this boundary is already sealed. Backends store and
//! return `content` verbatim and never see a key, a passphrase, or
//! plaintext.

pub mod file_kv;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export public types
pub use file_kv::FileKeyValueStore;
pub use memory::{MemoryEntryStore, MemoryKeyValueStore};
pub use traits::{EntryStore, KeyValueStore};
pub use types::{EntryPatch, EntryRecord, Mood, NewEntryRecord};

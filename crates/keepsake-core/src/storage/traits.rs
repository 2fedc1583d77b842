//! Storage trait definitions.
//!
//! The `KeyValueStore` and `EntryStore` traits define the interfaces the
//! core talks to for persistence. The abstraction keeps the core portable
//! across hosts (browser-style local storage, a JSON file, a server-side
//! database) without changing journal logic, and it is where the privacy
//! boundary sits: everything handed to an `EntryStore` is already sealed.

use uuid::Uuid;

use super::types::{EntryPatch, EntryRecord, NewEntryRecord};
use crate::error::Result;

/// Durable store for small device-local values, such as the encryption salt.
///
/// All implementations must ensure:
/// - Values written survive process restart (memory impls are test-only)
/// - `get` after `set` returns the written value
/// - Keys are case-sensitive and compared exactly
pub trait KeyValueStore {
    /// Get the value stored under `key`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(value))` if present, `Ok(None)` if not.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Storage` if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Check whether `key` has a stored value.
    fn contains(&self, key: &str) -> Result<bool>;

    /// Remove the value stored under `key`, if any.
    ///
    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Document store for journal entry records, keyed by owner and record id.
///
/// All implementations must ensure:
/// - The store assigns ids and timestamps; callers never supply them
/// - `content` is opaque: stored and returned verbatim, never inspected
/// - Listings are newest-first by creation time
pub trait EntryStore {
    /// Insert a new entry record.
    ///
    /// # Returns
    ///
    /// Returns the stored record with its assigned `id`, `created_at` and
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Storage` if the record cannot be persisted.
    fn insert(&mut self, record: NewEntryRecord) -> Result<EntryRecord>;

    /// Get an entry record by ID.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(record))` if found, `Ok(None)` if not found.
    fn get(&self, id: &Uuid) -> Result<Option<EntryRecord>>;

    /// List all records belonging to an owner.
    ///
    /// Records are returned in reverse chronological order (newest first).
    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<EntryRecord>>;

    /// Apply a patch to an existing record.
    ///
    /// The store refreshes `updated_at`; `created_at` is immutable.
    ///
    /// # Returns
    ///
    /// Returns the record as stored after the patch.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::EntryNotFound` if no record has this id.
    fn update(&mut self, id: &Uuid, patch: EntryPatch) -> Result<EntryRecord>;

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::EntryNotFound` if no record has this id.
    fn delete(&mut self, id: &Uuid) -> Result<()>;
}

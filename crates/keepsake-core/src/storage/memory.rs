//! In-memory storage backends.
//!
//! Reference implementations of the storage traits. They double as test
//! infrastructure and as executable documentation of the trait contracts;
//! nothing here survives a process restart.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::traits::{EntryStore, KeyValueStore};
use super::types::{EntryPatch, EntryRecord, NewEntryRecord};
use crate::error::{KeepsakeError, Result};

/// A `KeyValueStore` backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.values.contains_key(key))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// An `EntryStore` backed by a `Vec` in insertion order.
///
/// Insertion order is creation order, so the newest-first listing is just
/// the reverse walk.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    records: Vec<EntryRecord>,
}

impl MemoryEntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryEntryStore {
    fn insert(&mut self, record: NewEntryRecord) -> Result<EntryRecord> {
        let now = Utc::now();
        let stored = EntryRecord {
            id: Uuid::new_v4(),
            owner_id: record.owner_id,
            content: record.content,
            mood: record.mood,
            tags: record.tags,
            salt: record.salt,
            created_at: now,
            updated_at: now,
        };
        self.records.push(stored.clone());
        Ok(stored)
    }

    fn get(&self, id: &Uuid) -> Result<Option<EntryRecord>> {
        Ok(self.records.iter().find(|r| r.id == *id).cloned())
    }

    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<EntryRecord>> {
        Ok(self
            .records
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn update(&mut self, id: &Uuid, patch: EntryPatch) -> Result<EntryRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or(KeepsakeError::EntryNotFound(*id))?;

        if let Some(content) = patch.content {
            record.content = content;
        }
        if let Some(mood) = patch.mood {
            record.mood = mood;
        }
        if let Some(tags) = patch.tags {
            record.tags = tags;
        }
        if let Some(salt) = patch.salt {
            record.salt = salt;
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    fn delete(&mut self, id: &Uuid) -> Result<()> {
        let position = self
            .records
            .iter()
            .position(|r| r.id == *id)
            .ok_or(KeepsakeError::EntryNotFound(*id))?;
        self.records.remove(position);
        Ok(())
    }
}

//! File-backed key-value store.
//!
//! A single JSON object file, loaded on open and rewritten after every
//! mutation. Writes go through a sibling temp file and an atomic rename so
//! a crash mid-write leaves the previous file intact. This is the durable
//! home for the device salt on desktop hosts.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;
use crate::error::{KeepsakeError, Result};

/// A `KeyValueStore` persisted as a JSON file.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileKeyValueStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file means an empty store; a present but unparseable file
    /// is an error, not a reset.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Io` if the file cannot be read and
    /// `KeepsakeError::Storage` if its contents are not a JSON string map.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let values: HashMap<String, String> = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw).map_err(|e| {
                KeepsakeError::Storage(format!(
                    "Corrupt key-value store at {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            HashMap::new()
        };
        log::debug!("Loaded {} values from {}", values.len(), path.display());

        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        rename_with_fallback(&temp_path, &self.path)?;
        log::debug!("Persisted {} values to {}", self.values.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.values.contains_key(key))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Atomically rename a file, with fallback for platforms where rename fails
/// if the target exists.
///
/// Windows refuses to rename over an existing file; the fallback removes the
/// destination and retries. If the rename still fails the temp file is
/// cleaned up so it cannot be mistaken for the real store later.
fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

//! The journal service: sealed writes, per-entry tolerant reads.
//!
//! `Journal` is the seam between plaintext drafts and the opaque records a
//! store holds. Content is encrypted before any store call, so a failed
//! encryption persists nothing, and reads decrypt entry by entry: one bad
//! record degrades to a placeholder instead of hiding the rest of the
//! journal.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{KeepsakeError, Result};
use crate::session::KeySession;
use crate::storage::{EntryPatch, EntryRecord, EntryStore, Mood, NewEntryRecord};

/// What a reader sees in place of an entry that would not decrypt.
///
/// Exported so callers can recognize degraded rows; a stronger key or a
/// repaired record brings the real content back on the next read.
pub const DECRYPTION_FAILED_PLACEHOLDER: &str = "[Decryption failed]";

/// A plaintext draft on its way into the journal.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub content: String,
    pub mood: Mood,
    pub tags: Vec<String>,
}

impl EntryDraft {
    /// Create a draft with no tags.
    pub fn new(content: impl Into<String>, mood: Mood) -> Self {
        Self {
            content: content.into(),
            mood,
            tags: Vec::new(),
        }
    }

    /// Attach tags to the draft.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// The decrypted view of a stored entry.
///
/// `content` is either the real plaintext or
/// [`DECRYPTION_FAILED_PLACEHOLDER`]; everything else passes through from
/// the record unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub owner_id: String,
    pub content: String,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Journal operations over an entry store.
///
/// The key lifecycle stays with the caller: every sealing operation takes
/// the `KeySession` it should seal under, and fails with `KeyUnavailable`
/// when the session holds no key.
#[derive(Debug)]
pub struct Journal<S: EntryStore> {
    store: S,
}

impl<S: EntryStore> Journal<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the journal and hand the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Encrypt and persist a new entry.
    ///
    /// # Errors
    ///
    /// - `KeepsakeError::InvalidInput` if the content is blank (empty or
    ///   whitespace only)
    /// - `KeepsakeError::KeyUnavailable` if the session holds no key
    /// - `KeepsakeError::Encryption` if sealing fails; nothing is persisted
    /// - `KeepsakeError::Storage` if the store rejects the write
    pub fn save_entry(
        &mut self,
        session: &KeySession,
        owner_id: &str,
        draft: EntryDraft,
    ) -> Result<EntryRecord> {
        if draft.content.trim().is_empty() {
            return Err(KeepsakeError::InvalidInput(
                "Entry content must not be blank".to_string(),
            ));
        }

        // Seal first: a failure here must leave the store untouched
        let sealed = session.encrypt(&draft.content)?;
        let salt = session
            .salt()
            .ok_or(KeepsakeError::KeyUnavailable)?
            .to_base64();

        let record = self.store.insert(NewEntryRecord {
            owner_id: owner_id.to_string(),
            content: sealed,
            mood: draft.mood,
            tags: draft.tags,
            salt,
        })?;
        log::debug!("Saved entry {}", record.id);
        Ok(record)
    }

    /// List an owner's entries newest-first, decrypting each one.
    ///
    /// Decryption failures never abort the batch: the affected entry comes
    /// back with [`DECRYPTION_FAILED_PLACEHOLDER`] as its content and the
    /// rest of the journal is unaffected.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::KeyUnavailable` if the session holds no key
    /// and `KeepsakeError::Storage` if the listing itself fails.
    pub fn entries(&self, session: &KeySession, owner_id: &str) -> Result<Vec<JournalEntry>> {
        if !session.is_ready() {
            return Err(KeepsakeError::KeyUnavailable);
        }

        let records = self.store.list_for_owner(owner_id)?;
        let entries = records
            .into_iter()
            .map(|record| {
                let content = match session.decrypt(&record.content) {
                    Ok(plaintext) => plaintext,
                    Err(_) => {
                        log::warn!("Entry {} failed to decrypt", record.id);
                        DECRYPTION_FAILED_PLACEHOLDER.to_string()
                    }
                };
                JournalEntry {
                    id: record.id,
                    owner_id: record.owner_id,
                    content,
                    mood: record.mood,
                    tags: record.tags,
                    created_at: record.created_at,
                    updated_at: record.updated_at,
                }
            })
            .collect();
        Ok(entries)
    }

    /// Fetch and decrypt a single entry.
    ///
    /// Unlike the batch listing, a single-entry read surfaces its
    /// `Decryption` failure: the caller asked for exactly this entry and
    /// a placeholder would hide the answer.
    ///
    /// # Errors
    ///
    /// `KeyUnavailable`, `EntryNotFound`, `Decryption` or `Storage`.
    pub fn entry(&self, session: &KeySession, id: &Uuid) -> Result<JournalEntry> {
        if !session.is_ready() {
            return Err(KeepsakeError::KeyUnavailable);
        }

        let record = self
            .store
            .get(id)?
            .ok_or(KeepsakeError::EntryNotFound(*id))?;
        let content = session.decrypt(&record.content)?;

        Ok(JournalEntry {
            id: record.id,
            owner_id: record.owner_id,
            content,
            mood: record.mood,
            tags: record.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Re-encrypt and update an existing entry.
    ///
    /// The content is sealed under a fresh nonce and the record is stamped
    /// with the session's current salt echo; the store refreshes
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Same as [`save_entry`](Self::save_entry), plus
    /// `KeepsakeError::EntryNotFound` if no record has this id.
    pub fn update_entry(
        &mut self,
        session: &KeySession,
        id: &Uuid,
        draft: EntryDraft,
    ) -> Result<EntryRecord> {
        if draft.content.trim().is_empty() {
            return Err(KeepsakeError::InvalidInput(
                "Entry content must not be blank".to_string(),
            ));
        }

        let sealed = session.encrypt(&draft.content)?;
        let salt = session
            .salt()
            .ok_or(KeepsakeError::KeyUnavailable)?
            .to_base64();

        let record = self.store.update(
            id,
            EntryPatch {
                content: Some(sealed),
                mood: Some(draft.mood),
                tags: Some(draft.tags),
                salt: Some(salt),
            },
        )?;
        log::debug!("Updated entry {}", record.id);
        Ok(record)
    }

    /// Delete an entry.
    ///
    /// Deletion needs no key; the record is removed sealed.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::EntryNotFound` if no record has this id.
    pub fn delete_entry(&mut self, id: &Uuid) -> Result<()> {
        self.store.delete(id)?;
        log::debug!("Deleted entry {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Salt;
    use crate::storage::MemoryEntryStore;
    use secrecy::SecretString;

    fn ready_session() -> KeySession {
        let mut session = KeySession::new();
        session
            .set_passphrase(
                &SecretString::from("test-passphrase"),
                &Salt::from_bytes(*b"0123456789abcdef"),
            )
            .unwrap();
        session
    }

    fn journal() -> Journal<MemoryEntryStore> {
        Journal::new(MemoryEntryStore::new())
    }

    #[test]
    fn test_save_stores_ciphertext_not_plaintext() {
        let session = ready_session();
        let mut journal = journal();

        let record = journal
            .save_entry(&session, "user-1", EntryDraft::new("Today was good.", Mood::Happy))
            .unwrap();

        assert!(!record.content.contains("Today was good."));
        assert!(record.content.contains(':'));
        assert_eq!(record.mood, Mood::Happy);
        assert_eq!(record.salt, session.salt().unwrap().to_base64());
    }

    #[test]
    fn test_save_then_list_round_trip() {
        let session = ready_session();
        let mut journal = journal();

        journal
            .save_entry(&session, "user-1", EntryDraft::new("First entry", Mood::Calm))
            .unwrap();
        journal
            .save_entry(
                &session,
                "user-1",
                EntryDraft::new("Second entry", Mood::Excited)
                    .with_tags(vec!["milestone".to_string()]),
            )
            .unwrap();

        let entries = journal.entries(&session, "user-1").unwrap();
        assert_eq!(entries.len(), 2);
        // Newest first
        assert_eq!(entries[0].content, "Second entry");
        assert_eq!(entries[0].tags, vec!["milestone".to_string()]);
        assert_eq!(entries[1].content, "First entry");
    }

    #[test]
    fn test_blank_content_rejected() {
        let session = ready_session();
        let mut journal = journal();

        for blank in ["", "   ", "\n\t "] {
            let result =
                journal.save_entry(&session, "user-1", EntryDraft::new(blank, Mood::Content));
            assert!(matches!(result, Err(KeepsakeError::InvalidInput(_))));
        }

        assert!(journal.entries(&session, "user-1").unwrap().is_empty());
    }

    #[test]
    fn test_save_without_key_persists_nothing() {
        let ready = ready_session();
        let locked = KeySession::new();
        let mut journal = journal();

        let result = journal.save_entry(&locked, "user-1", EntryDraft::new("text", Mood::Sad));
        assert!(matches!(result, Err(KeepsakeError::KeyUnavailable)));

        assert!(journal.entries(&ready, "user-1").unwrap().is_empty());
    }

    #[test]
    fn test_list_without_key_fails() {
        let journal = journal();
        let locked = KeySession::new();

        assert!(matches!(
            journal.entries(&locked, "user-1"),
            Err(KeepsakeError::KeyUnavailable)
        ));
    }

    #[test]
    fn test_wrong_key_yields_placeholder_not_abort() {
        let mut journal = journal();
        let session = ready_session();

        journal
            .save_entry(&session, "user-1", EntryDraft::new("Readable", Mood::Calm))
            .unwrap();

        let mut wrong = KeySession::new();
        wrong
            .set_passphrase(
                &SecretString::from("wrong-passphrase"),
                &Salt::from_bytes(*b"0123456789abcdef"),
            )
            .unwrap();
        journal
            .save_entry(&wrong, "user-1", EntryDraft::new("Sealed elsewhere", Mood::Angry))
            .unwrap();

        let entries = journal.entries(&session, "user-1").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, DECRYPTION_FAILED_PLACEHOLDER);
        assert_eq!(entries[0].mood, Mood::Angry);
        assert_eq!(entries[1].content, "Readable");
    }

    #[test]
    fn test_single_entry_read_surfaces_decrypt_failure() {
        let mut journal = journal();
        let session = ready_session();

        let mut other = KeySession::new();
        other
            .set_passphrase(
                &SecretString::from("other-passphrase"),
                &Salt::from_bytes(*b"0123456789abcdef"),
            )
            .unwrap();
        let record = journal
            .save_entry(&other, "user-1", EntryDraft::new("theirs", Mood::Calm))
            .unwrap();

        assert!(matches!(
            journal.entry(&session, &record.id),
            Err(KeepsakeError::Decryption)
        ));
    }

    #[test]
    fn test_update_reencrypts_under_fresh_nonce() {
        let session = ready_session();
        let mut journal = journal();

        let record = journal
            .save_entry(&session, "user-1", EntryDraft::new("Original", Mood::Calm))
            .unwrap();
        let updated = journal
            .update_entry(&session, &record.id, EntryDraft::new("Original", Mood::Calm))
            .unwrap();

        // Same plaintext, new nonce, different ciphertext
        assert_ne!(updated.content, record.content);
        assert_eq!(
            journal.entry(&session, &record.id).unwrap().content,
            "Original"
        );
    }

    #[test]
    fn test_update_missing_entry_fails() {
        let session = ready_session();
        let mut journal = journal();

        let result = journal.update_entry(
            &session,
            &Uuid::new_v4(),
            EntryDraft::new("text", Mood::Calm),
        );
        assert!(matches!(result, Err(KeepsakeError::EntryNotFound(_))));
    }

    #[test]
    fn test_delete_needs_no_key() {
        let session = ready_session();
        let mut journal = journal();

        let record = journal
            .save_entry(&session, "user-1", EntryDraft::new("short-lived", Mood::Sad))
            .unwrap();

        journal.delete_entry(&record.id).unwrap();
        assert!(journal.entries(&session, "user-1").unwrap().is_empty());

        assert!(matches!(
            journal.delete_entry(&record.id),
            Err(KeepsakeError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_owners_are_isolated() {
        let session = ready_session();
        let mut journal = journal();

        journal
            .save_entry(&session, "user-1", EntryDraft::new("mine", Mood::Happy))
            .unwrap();
        journal
            .save_entry(&session, "user-2", EntryDraft::new("theirs", Mood::Sad))
            .unwrap();

        let mine = journal.entries(&session, "user-1").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].content, "mine");
    }
}

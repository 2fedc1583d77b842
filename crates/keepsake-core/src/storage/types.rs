//! Record types shared across storage backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed mood palette journal entries are tagged with.
///
/// Serialized in lowercase (`"happy"`, `"content"`, ...) to stay
/// compatible with records written by earlier versions of the system.
/// Ordering follows palette order, which analytics rely on for stable
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Anxious,
    Excited,
    Calm,
    Frustrated,
    Content,
}

impl Mood {
    /// Every mood, in palette order.
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Anxious,
        Mood::Excited,
        Mood::Calm,
        Mood::Frustrated,
        Mood::Content,
    ];

    /// The lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Anxious => "anxious",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Frustrated => "frustrated",
            Mood::Content => "content",
        }
    }

    /// The positive half of the palette, as the insight rules classify it.
    pub fn is_positive(&self) -> bool {
        matches!(self, Mood::Happy | Mood::Excited | Mood::Calm | Mood::Content)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored journal entry.
///
/// `content` holds the encoded ciphertext and is opaque to every storage
/// backend. `salt` echoes the base64 device salt that was in effect when
/// the entry was written; it travels with the record as a recovery
/// breadcrumb and is otherwise pass-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Store-assigned identifier
    pub id: Uuid,
    /// The owner this entry belongs to
    pub owner_id: String,
    /// Encoded ciphertext (`base64(nonce) ":" base64(ciphertext)`)
    pub content: String,
    /// Mood the entry was tagged with
    pub mood: Mood,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Base64 echo of the salt in effect at write time
    pub salt: String,
    /// When the record was created (store-assigned)
    pub created_at: DateTime<Utc>,
    /// When the record was last modified (store-assigned)
    pub updated_at: DateTime<Utc>,
}

/// The writable fields of a new entry; the store assigns the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntryRecord {
    pub owner_id: String,
    pub content: String,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub salt: String,
}

/// A partial update to an existing entry.
///
/// `Some` replaces the field, `None` leaves it untouched. Ids and
/// timestamps are never patchable; the store refreshes `updated_at` itself.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub content: Option<String>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
    pub salt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Frustrated).unwrap();
        assert_eq!(json, "\"frustrated\"");

        let back: Mood = serde_json::from_str("\"content\"").unwrap();
        assert_eq!(back, Mood::Content);
    }

    #[test]
    fn test_mood_all_covers_palette() {
        assert_eq!(Mood::ALL.len(), 8);
        for mood in Mood::ALL {
            assert_eq!(
                serde_json::to_string(&mood).unwrap(),
                format!("\"{}\"", mood.as_str())
            );
        }
    }

    #[test]
    fn test_mood_positive_split() {
        let positive: Vec<Mood> = Mood::ALL.iter().copied().filter(Mood::is_positive).collect();
        assert_eq!(
            positive,
            vec![Mood::Happy, Mood::Excited, Mood::Calm, Mood::Content]
        );
    }

    #[test]
    fn test_entry_record_round_trips_through_json() {
        let record = EntryRecord {
            id: Uuid::new_v4(),
            owner_id: "user-1".to_string(),
            content: "bm9uY2U=:Y2lwaGVy".to_string(),
            mood: Mood::Calm,
            tags: vec!["evening".to_string()],
            salt: "AAAAAAAAAAAAAAAAAAAAAA==".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: EntryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_patch_default_changes_nothing() {
        let patch = EntryPatch::default();
        assert!(patch.content.is_none());
        assert!(patch.mood.is_none());
        assert!(patch.tags.is_none());
        assert!(patch.salt.is_none());
    }
}

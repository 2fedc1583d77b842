//! Mood aggregates over decrypted entries.
//!
//! Pure functions, no I/O: callers decrypt first (via `Journal::entries`)
//! and hand the plaintext view in. Day boundaries are UTC dates; the
//! `_as_of` variants take a fixed reference day so results are reproducible.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::journal::JournalEntry;
use crate::storage::Mood;

/// How many trailing days the mood trend covers.
const TREND_DAYS: i64 = 7;

/// One day in the weekly mood trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMood {
    /// The UTC day
    pub date: NaiveDate,
    /// The day's most frequent mood; `Mood::Content` for a day with no
    /// entries
    pub mood: Mood,
    /// Number of entries written that day
    pub count: usize,
}

/// Aggregate mood statistics over a set of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodAnalytics {
    /// Entry count per mood, every palette mood present (zero when unused)
    pub mood_distribution: BTreeMap<Mood, usize>,
    /// The last seven days, oldest first
    pub weekly_mood_trend: Vec<DailyMood>,
    /// Consecutive days ending today with at least one entry
    pub streak_days: u32,
    /// Total number of entries considered
    pub total_entries: usize,
}

/// Compute analytics with today (UTC) as the reference day.
///
/// Entries are expected newest-first, as `Journal::entries` returns them;
/// the streak scan depends on that order.
pub fn mood_analytics(entries: &[JournalEntry]) -> MoodAnalytics {
    mood_analytics_as_of(entries, Utc::now().date_naive())
}

/// Compute analytics against a fixed reference day.
pub fn mood_analytics_as_of(entries: &[JournalEntry], reference_day: NaiveDate) -> MoodAnalytics {
    let mut mood_distribution: BTreeMap<Mood, usize> =
        Mood::ALL.iter().map(|m| (*m, 0)).collect();
    for entry in entries {
        if let Some(count) = mood_distribution.get_mut(&entry.mood) {
            *count += 1;
        }
    }

    // Streak: walk newest-first; each day on the streak frontier extends
    // it, a day beyond the frontier breaks it, repeats of a counted day
    // are skipped. No entry today means no streak.
    let mut streak_days: u32 = 0;
    for entry in entries {
        let day_diff = (reference_day - entry.created_at.date_naive()).num_days();
        if day_diff == i64::from(streak_days) {
            streak_days += 1;
        } else if day_diff > i64::from(streak_days) {
            break;
        }
    }

    let mut weekly_mood_trend = Vec::with_capacity(TREND_DAYS as usize);
    for offset in (0..TREND_DAYS).rev() {
        let day = reference_day - chrono::Duration::days(offset);
        let mut day_counts: BTreeMap<Mood, usize> = BTreeMap::new();
        for entry in entries {
            if entry.created_at.date_naive() == day {
                *day_counts.entry(entry.mood).or_insert(0) += 1;
            }
        }
        let count: usize = day_counts.values().sum();

        weekly_mood_trend.push(DailyMood {
            date: day,
            mood: if count > 0 {
                most_frequent(&day_counts)
            } else {
                Mood::Content
            },
            count,
        });
    }

    MoodAnalytics {
        mood_distribution,
        weekly_mood_trend,
        streak_days,
        total_entries: entries.len(),
    }
}

/// Generate the textual nudges shown alongside the journal.
///
/// Empty input produces no insights.
pub fn mood_insights(entries: &[JournalEntry]) -> Vec<String> {
    mood_insights_as_of(entries, Utc::now().date_naive())
}

/// Generate insights against a fixed reference day.
pub fn mood_insights_as_of(entries: &[JournalEntry], reference_day: NaiveDate) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let analytics = mood_analytics_as_of(entries, reference_day);
    let mut insights = Vec::new();

    let most_common = most_frequent(&analytics.mood_distribution);
    insights.push(format!(
        "Your most common mood this week is **{}**.",
        most_common
    ));

    if analytics.streak_days > 1 {
        insights.push(format!(
            "You're on a journaling streak of {} days! Keep going!",
            analytics.streak_days
        ));
    }

    // The trend's filler days read as content, so quiet stretches lean
    // positive here, matching long-standing behavior.
    let trend = &analytics.weekly_mood_trend;
    let recent = &trend[trend.len().saturating_sub(3)..];
    if recent.iter().all(|d| d.mood.is_positive()) {
        insights.push(
            "You've been enjoying several positive days. Keep up the great work! 🌞".to_string(),
        );
    } else if recent.iter().all(|d| !d.mood.is_positive()) {
        insights.push(
            "You seem to have had a few tough days. Remember, it's okay to feel those emotions."
                .to_string(),
        );
    }

    if analytics.total_entries >= 7 {
        insights.push("You're building a consistent journaling habit. Well done!".to_string());
    }

    insights
}

/// The mood with the highest count; ties resolve to the earliest mood in
/// the palette.
fn most_frequent(counts: &BTreeMap<Mood, usize>) -> Mood {
    let mut best_mood = Mood::Happy;
    let mut best_count = counts.get(&Mood::Happy).copied().unwrap_or(0);
    for mood in Mood::ALL {
        let count = counts.get(&mood).copied().unwrap_or(0);
        if count > best_count {
            best_mood = mood;
            best_count = count;
        }
    }
    best_mood
}

//! Human-facing date presentation.
//!
//! Pure helpers over UTC timestamps. Every function takes the reference
//! instant explicitly so output is reproducible; callers pass `Utc::now()`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::journal::JournalEntry;

/// First day of the week containing `date`, with weeks starting on Sunday.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Format a timestamp the way the journal list shows it.
///
/// The nearer the entry, the more the wording leans on context: today and
/// yesterday by name, a weekday within the current week, month and day
/// within the current month, and the full date beyond that.
pub fn format_entry_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let entry_day = date.date_naive();
    let today = now.date_naive();

    if entry_day == today {
        format!("Today, {}", date.format("%-I:%M %p"))
    } else if entry_day == today - Duration::days(1) {
        format!("Yesterday, {}", date.format("%-I:%M %p"))
    } else if week_start(entry_day) == week_start(today) {
        date.format("%A, %-I:%M %p").to_string()
    } else if entry_day.year() == today.year() && entry_day.month() == today.month() {
        date.format("%b %-d, %-I:%M %p").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Coarse "how long ago" wording.
///
/// Buckets are whole 24-hour periods, then weeks of 7, months of 30 and
/// years of 365 days.
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - date).num_days();

    if days == 0 {
        return "Today".to_string();
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    if days < 7 {
        return format!("{} days ago", days);
    }
    if days < 30 {
        return format!("{} weeks ago", days / 7);
    }
    if days < 365 {
        return format!("{} months ago", days / 30);
    }
    format!("{} years ago", days / 365)
}

/// Group entries by their UTC creation day.
///
/// Relative order within each day follows the input order, so a
/// newest-first listing stays newest-first inside its day group.
pub fn group_entries_by_day(entries: &[JournalEntry]) -> BTreeMap<NaiveDate, Vec<&JournalEntry>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&JournalEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.created_at.date_naive())
            .or_default()
            .push(entry);
    }
    groups
}

//! Diary use-case service.
//!
//! # Responsibility
//! - Provide the entry points presentation layers call: submit, list,
//!   month view, export.
//! - Clamp submissions to documented ranges at the system boundary.
//!
//! # Invariants
//! - Service APIs never bypass the store's upsert/rewrite contract.
//! - The service stays storage-agnostic; anything implementing `EntryStore`
//!   works.
//! - A month view carries a summary exactly when the month has entries.

use crate::model::entry::{clamp_mood, clamp_sleep_hours, clamp_stress, Entry, MonthSummary};
use crate::store::entry_store::EntryStore;
use crate::store::StoreResult;
use chrono::{Datelike, NaiveDate};

/// Submission payload for one day.
///
/// Values are concrete here; blanks only exist in persisted data.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub sleep_hours: f64,
    pub mood: i64,
    pub stress: i64,
    pub notes: Option<String>,
}

/// Month-scoped view envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    /// Entries of the month, ascending by date.
    pub entries: Vec<Entry>,
    /// `None` when the month has no entries; presentation layers substitute
    /// their "no data" rendering.
    pub summary: Option<MonthSummary>,
}

/// Use-case facade over an entry store.
pub struct DiaryService<S: EntryStore> {
    store: S,
}

impl<S: EntryStore> DiaryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Clamps the submission to documented ranges and upserts it by date.
    ///
    /// Out-of-range values can therefore no longer enter storage through
    /// this path; whatever is already persisted is left untouched.
    pub fn add_entry(&self, submission: &NewEntry) -> StoreResult<Vec<Entry>> {
        let notes = submission
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|trimmed| !trimmed.is_empty())
            .map(str::to_string);

        let entry = Entry {
            date: submission.date,
            sleep_hours: Some(clamp_sleep_hours(submission.sleep_hours)),
            mood: Some(clamp_mood(submission.mood)),
            stress: Some(clamp_stress(submission.stress)),
            notes,
        };
        self.store.save(&entry)
    }

    /// Full table in storage order.
    pub fn entries(&self) -> StoreResult<Vec<Entry>> {
        self.store.load()
    }

    /// Entries of one month plus their aggregate.
    pub fn month_view(&self, year: i32, month: u32) -> StoreResult<MonthView> {
        let entries = filter_by_month(&self.store.load()?, year, month);
        let summary = aggregate_entries(&entries);
        Ok(MonthView { entries, summary })
    }

    /// Download artifact: the full table, newest first.
    pub fn export_csv(&self) -> StoreResult<String> {
        self.store.export()
    }
}

/// Pure month filter, ascending by date. Empty input or no matches yield an
/// empty vec.
pub fn filter_by_month(entries: &[Entry], year: i32, month: u32) -> Vec<Entry> {
    let mut matches: Vec<Entry> = entries
        .iter()
        .filter(|entry| entry.date.year() == year && entry.date.month() == month)
        .cloned()
        .collect();
    matches.sort_by_key(|entry| entry.date);
    matches
}

/// Aggregates an entry sequence; `None` on empty input, so the no-data case
/// cannot be aggregated by accident.
pub fn aggregate_entries(entries: &[Entry]) -> Option<MonthSummary> {
    if entries.is_empty() {
        return None;
    }
    Some(MonthSummary {
        count: entries.len(),
        mean_sleep_hours: mean(entries.iter().filter_map(|entry| entry.sleep_hours)),
        mean_mood: mean(entries.iter().filter_map(|entry| entry.mood.map(|v| v as f64))),
        mean_stress: mean(entries.iter().filter_map(|entry| entry.stress.map(|v| v as f64))),
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(round_2dp(sum / count as f64))
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

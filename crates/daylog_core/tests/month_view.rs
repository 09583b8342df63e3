use chrono::NaiveDate;
use daylog_core::{
    aggregate_entries, filter_by_month, CsvEntryStore, DiaryService, Entry, NewEntry,
};

#[test]
fn filter_returns_only_the_requested_month_in_ascending_order() {
    let entries = vec![
        entry("2024-02-20", 6.0, 3, 4),
        entry("2024-01-15", 7.0, 4, 3),
        entry("2024-02-01", 8.0, 5, 2),
    ];

    let filtered = filter_by_month(&entries, 2024, 2);
    let dates: Vec<NaiveDate> = filtered.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date("2024-02-01"), date("2024-02-20")]);
}

#[test]
fn filter_with_no_matches_is_empty_and_must_not_be_aggregated() {
    let entries = vec![entry("2024-01-15", 7.0, 4, 3)];

    let filtered = filter_by_month(&entries, 2024, 6);
    assert!(filtered.is_empty());
    assert_eq!(aggregate_entries(&filtered), None);
}

#[test]
fn filter_distinguishes_same_month_of_different_years() {
    let entries = vec![
        entry("2023-02-10", 6.0, 3, 4),
        entry("2024-02-10", 8.0, 5, 2),
    ];

    let filtered = filter_by_month(&entries, 2024, 2);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].date, date("2024-02-10"));
}

#[test]
fn aggregate_computes_means_over_the_sequence() {
    let entries = vec![
        entry("2024-02-01", 6.0, 3, 2),
        entry("2024-02-02", 7.0, 4, 3),
        entry("2024-02-03", 8.0, 4, 4),
    ];

    let summary = aggregate_entries(&entries).unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.mean_sleep_hours, Some(7.0));
    // 11 / 3 rounded to two decimals.
    assert_eq!(summary.mean_mood, Some(3.67));
    assert_eq!(summary.mean_stress, Some(3.0));
}

#[test]
fn aggregate_skips_blank_cells_but_counts_every_entry() {
    let mut blank = entry("2024-02-02", 0.0, 1, 0);
    blank.sleep_hours = None;
    blank.mood = None;
    blank.stress = None;
    let entries = vec![entry("2024-02-01", 6.0, 4, 2), blank];

    let summary = aggregate_entries(&entries).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean_sleep_hours, Some(6.0));
    assert_eq!(summary.mean_mood, Some(4.0));
    assert_eq!(summary.mean_stress, Some(2.0));
}

#[test]
fn aggregate_of_a_fully_blank_column_has_no_mean() {
    let mut first = entry("2024-02-01", 6.0, 4, 2);
    let mut second = entry("2024-02-02", 7.0, 3, 3);
    first.sleep_hours = None;
    second.sleep_hours = None;

    let summary = aggregate_entries(&[first, second]).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean_sleep_hours, None);
    assert_eq!(summary.mean_mood, Some(3.5));
}

#[test]
fn month_view_bundles_filtered_entries_with_their_summary() {
    let dir = tempfile::tempdir().unwrap();
    let service = DiaryService::new(CsvEntryStore::new(dir.path().join("entries.csv")));

    service.add_entry(&submission("2024-02-20", 6.0, 3, 4)).unwrap();
    service.add_entry(&submission("2024-01-15", 7.0, 4, 3)).unwrap();
    service.add_entry(&submission("2024-02-01", 8.0, 5, 2)).unwrap();

    let view = service.month_view(2024, 2).unwrap();
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].date, date("2024-02-01"));
    assert_eq!(view.entries[1].date, date("2024-02-20"));

    let summary = view.summary.unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean_sleep_hours, Some(7.0));
}

#[test]
fn month_view_of_an_empty_month_has_no_summary() {
    let dir = tempfile::tempdir().unwrap();
    let service = DiaryService::new(CsvEntryStore::new(dir.path().join("entries.csv")));

    service.add_entry(&submission("2024-01-15", 7.0, 4, 3)).unwrap();

    let view = service.month_view(2024, 6).unwrap();
    assert!(view.entries.is_empty());
    assert_eq!(view.summary, None);
}

#[test]
fn add_entry_clamps_out_of_range_submissions() {
    let dir = tempfile::tempdir().unwrap();
    let service = DiaryService::new(CsvEntryStore::new(dir.path().join("entries.csv")));

    let saved = service
        .add_entry(&NewEntry {
            date: date("2024-02-01"),
            sleep_hours: 20.0,
            mood: 9,
            stress: -3,
            notes: Some("   ".to_string()),
        })
        .unwrap();

    assert_eq!(saved[0].sleep_hours, Some(12.0));
    assert_eq!(saved[0].mood, Some(5));
    assert_eq!(saved[0].stress, Some(0));
    assert_eq!(saved[0].notes, None);
}

#[test]
fn add_entry_replaces_the_existing_day() {
    let dir = tempfile::tempdir().unwrap();
    let service = DiaryService::new(CsvEntryStore::new(dir.path().join("entries.csv")));

    service.add_entry(&submission("2024-02-01", 6.0, 3, 4)).unwrap();
    let updated = service.add_entry(&submission("2024-02-01", 8.0, 5, 1)).unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].sleep_hours, Some(8.0));
    assert_eq!(updated[0].mood, Some(5));
}

fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}

fn entry(day: &str, sleep: f64, mood: i64, stress: i64) -> Entry {
    Entry {
        date: date(day),
        sleep_hours: Some(sleep),
        mood: Some(mood),
        stress: Some(stress),
        notes: None,
    }
}

fn submission(day: &str, sleep: f64, mood: i64, stress: i64) -> NewEntry {
    NewEntry {
        date: date(day),
        sleep_hours: sleep,
        mood,
        stress,
        notes: None,
    }
}

//! Entry store contract and CSV-backed implementation.
//!
//! # Responsibility
//! - Provide load/save/export over the canonical entries table.
//! - Keep file layout and legacy-column migration inside the storage
//!   boundary.
//!
//! # Invariants
//! - At most one row per date; `save` replaces in place, never duplicates.
//! - Every `load` re-reads the file; no cached table state.
//! - Legacy columns are upgraded in memory on read; the file itself is only
//!   rewritten on the next save.

use crate::model::entry::{mood_from_legacy, stress_from_legacy, Entry};
use crate::store::csv::{parse_records, push_record};
use crate::store::{StoreError, StoreResult};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const CANONICAL_HEADER: [&str; 5] = ["date", "sleep_hours", "mood", "stress", "notes"];
const LEGACY_MOOD_COLUMN: &str = "mood_0_10";
const LEGACY_STRESS_COLUMN: &str = "stress_0_10";

/// Store interface for diary entry persistence.
pub trait EntryStore {
    /// Reads the full table, in storage order. A missing file is an empty
    /// table, not an error.
    fn load(&self) -> StoreResult<Vec<Entry>>;
    /// Upserts one entry by date and rewrites the table. Returns the updated
    /// full sequence.
    fn save(&self, entry: &Entry) -> StoreResult<Vec<Entry>>;
    /// Serializes the full table sorted newest-first, as offered for
    /// download.
    fn export(&self) -> StoreResult<String>;
}

/// CSV-file-backed entry store.
///
/// The storage location is injected at construction so tests and callers
/// can point the store anywhere.
pub struct CsvEntryStore {
    path: PathBuf,
}

impl CsvEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn unavailable(&self, reason: impl Into<String>) -> StoreError {
        StoreError::StorageUnavailable {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn read_table(&self) -> StoreResult<Option<RawTable>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let text = String::from_utf8(bytes)
            .map_err(|_| self.unavailable("file is not valid UTF-8"))?;
        let mut records = parse_records(&text)
            .map_err(|err| self.unavailable(err.to_string()))?
            .into_iter();
        let header = records
            .next()
            .ok_or_else(|| self.unavailable("missing header row"))?;

        Ok(Some(RawTable {
            header,
            rows: records.collect(),
        }))
    }

    /// One normalization pass: resolve canonical columns, apply legacy
    /// derivation, coerce cells, drop rows without a parseable date.
    fn normalize(&self, table: &RawTable) -> StoreResult<Vec<Entry>> {
        let date_col = table.column(CANONICAL_HEADER[0]);
        if date_col.is_none() {
            return Err(self.unavailable("header has no `date` column"));
        }
        let sleep_col = table.column(CANONICAL_HEADER[1]);
        let mood_col = table.column(CANONICAL_HEADER[2]);
        let stress_col = table.column(CANONICAL_HEADER[3]);
        let notes_col = table.column(CANONICAL_HEADER[4]);
        let legacy_mood_col = table.column(LEGACY_MOOD_COLUMN);
        let legacy_stress_col = table.column(LEGACY_STRESS_COLUMN);

        // Legacy values only fill a canonical column that is entirely empty;
        // a file already carrying new-scale data is left alone.
        let migrate_mood = legacy_mood_col.is_some() && table.column_is_empty(mood_col);
        let migrate_stress = legacy_stress_col.is_some() && table.column_is_empty(stress_col);

        let mut entries = Vec::with_capacity(table.rows.len());
        let mut dropped = 0usize;
        for row in &table.rows {
            let date_cell = table.cell(row, date_col);
            let Some(date) = parse_date_cell(date_cell) else {
                dropped += 1;
                warn!(
                    "event=row_dropped module=store status=recovered reason=invalid_date value={}",
                    date_cell.trim()
                );
                continue;
            };

            let mood = if migrate_mood {
                parse_int_cell(table.cell(row, legacy_mood_col)).map(mood_from_legacy)
            } else {
                parse_int_cell(table.cell(row, mood_col))
            };
            let stress = if migrate_stress {
                parse_int_cell(table.cell(row, legacy_stress_col)).map(stress_from_legacy)
            } else {
                parse_int_cell(table.cell(row, stress_col))
            };

            entries.push(Entry {
                date,
                sleep_hours: parse_float_cell(table.cell(row, sleep_col)),
                mood,
                stress,
                notes: parse_notes_cell(table.cell(row, notes_col)),
            });
        }

        debug!(
            "event=table_load module=store status=ok rows={} dropped={} legacy_mood={} legacy_stress={}",
            entries.len(),
            dropped,
            migrate_mood,
            migrate_stress
        );
        Ok(entries)
    }
}

impl EntryStore for CsvEntryStore {
    fn load(&self) -> StoreResult<Vec<Entry>> {
        match self.read_table()? {
            Some(table) => self.normalize(&table),
            None => {
                debug!("event=table_load module=store status=ok rows=0 detail=missing_file");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entry: &Entry) -> StoreResult<Vec<Entry>> {
        let mut entries = self.load()?;
        let replaced = match entries.iter_mut().find(|existing| existing.date == entry.date) {
            Some(existing) => {
                *existing = entry.clone();
                true
            }
            None => {
                entries.push(entry.clone());
                false
            }
        };

        write_atomic(&self.path, render_table(&entries).as_bytes())?;
        info!(
            "event=entry_saved module=store status=ok date={} op={} total_rows={}",
            entry.date,
            if replaced { "update" } else { "insert" },
            entries.len()
        );
        Ok(entries)
    }

    fn export(&self) -> StoreResult<String> {
        let mut entries = self.load()?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(render_table(&entries))
    }
}

struct RawTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|label| label.trim() == name)
    }

    fn cell<'a>(&self, row: &'a [String], index: Option<usize>) -> &'a str {
        index
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn column_is_empty(&self, index: Option<usize>) -> bool {
        match index {
            None => true,
            Some(i) => self
                .rows
                .iter()
                .all(|row| row.get(i).map_or(true, |cell| cell.trim().is_empty())),
        }
    }
}

fn render_table(entries: &[Entry]) -> String {
    let mut out = String::new();
    push_record(&mut out, &canonical_header());
    for entry in entries {
        push_record(&mut out, &entry_record(entry));
    }
    out
}

fn canonical_header() -> Vec<String> {
    CANONICAL_HEADER.iter().map(|name| name.to_string()).collect()
}

fn entry_record(entry: &Entry) -> Vec<String> {
    vec![
        entry.date.to_string(),
        entry.sleep_hours.map(|v| v.to_string()).unwrap_or_default(),
        entry.mood.map(|v| v.to_string()).unwrap_or_default(),
        entry.stress.map(|v| v.to_string()).unwrap_or_default(),
        entry.notes.clone().unwrap_or_default(),
    ]
}

fn parse_date_cell(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d").ok()
}

fn parse_float_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn parse_int_cell(cell: &str) -> Option<i64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Integer columns written back by spreadsheet tools often carry a float
    // rendering ("4.0"); accept it.
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|v| v.round() as i64))
}

fn parse_notes_cell(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Whole-file rewrite through a temp file and atomic rename, so a crash
/// mid-write leaves the previous table intact.
fn write_atomic(path: &Path, data: &[u8]) -> StoreResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("entries.csv");
    let temp_path = parent.join(format!("{file_name}.{}.{nanos}.tmp", std::process::id()));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }
    Ok(())
}

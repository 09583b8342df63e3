//! Diary entry domain model.
//!
//! # Responsibility
//! - Define the canonical per-day record shared by store and services.
//! - Own the value scales (sleep hours, mood, stress) and their clamps.
//!
//! # Invariants
//! - `date` is the unique key; the store never holds two entries for one day.
//! - Numeric fields are optional because persisted files can carry blank
//!   cells; the submission path always supplies concrete values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive sleep duration range, in hours.
pub const SLEEP_HOURS_MIN: f64 = 0.0;
pub const SLEEP_HOURS_MAX: f64 = 12.0;

/// Inclusive mood range on the current 1-5 scale.
pub const MOOD_MIN: i64 = 1;
pub const MOOD_MAX: i64 = 5;

/// Inclusive stress range.
pub const STRESS_MIN: i64 = 0;
pub const STRESS_MAX: i64 = 10;

/// Canonical record for one calendar day.
///
/// Serialized field names match the canonical storage header
/// (`date,sleep_hours,mood,stress,notes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Calendar day, ISO `%Y-%m-%d` in storage.
    pub date: NaiveDate,
    /// Hours slept, expected within [0, 12].
    pub sleep_hours: Option<f64>,
    /// Mood on the 1-5 scale. Legacy 0-10 data is rescaled on load.
    pub mood: Option<i64>,
    /// Stress on the 0-10 scale.
    pub stress: Option<i64>,
    /// Free-text remarks. Blank cells load as `None`.
    pub notes: Option<String>,
}

/// Aggregate over one month of entries.
///
/// Means are computed over the cells that carry a number and rounded to two
/// decimal places; a mean is `None` when no cell in that column is numeric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub count: usize,
    pub mean_sleep_hours: Option<f64>,
    pub mean_mood: Option<f64>,
    pub mean_stress: Option<f64>,
}

pub fn clamp_sleep_hours(value: f64) -> f64 {
    value.clamp(SLEEP_HOURS_MIN, SLEEP_HOURS_MAX)
}

pub fn clamp_mood(value: i64) -> i64 {
    value.clamp(MOOD_MIN, MOOD_MAX)
}

pub fn clamp_stress(value: i64) -> i64 {
    value.clamp(STRESS_MIN, STRESS_MAX)
}

/// Rescales a legacy 0-10 mood value onto the 1-5 scale.
///
/// Halves round away from zero, so legacy 7 becomes 4.
pub fn mood_from_legacy(value: i64) -> i64 {
    clamp_mood((value as f64 / 2.0).round() as i64)
}

/// Legacy stress stays on the same scale; migration only clamps.
pub fn stress_from_legacy(value: i64) -> i64 {
    clamp_stress(value)
}

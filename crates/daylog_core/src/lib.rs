//! Core domain logic for daylog, a personal sleep/mood/stress diary.
//! This crate is the single source of truth for diary invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::entry::{Entry, MonthSummary};
pub use service::diary_service::{
    aggregate_entries, filter_by_month, DiaryService, MonthView, NewEntry,
};
pub use store::{CsvEntryStore, EntryStore, StoreError, StoreResult};

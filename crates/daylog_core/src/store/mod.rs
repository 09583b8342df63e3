//! Flat-file record storage for diary entries.
//!
//! # Responsibility
//! - Define the storage error taxonomy for the record store.
//! - Expose the store trait and its CSV-backed implementation.
//!
//! # Invariants
//! - The persisted file is the single source of truth; every load re-reads it.
//! - A file that exists but is not parseable tabular data fails the whole
//!   load instead of yielding partial rows.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod csv;
pub mod entry_store;

pub use entry_store::{CsvEntryStore, EntryStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level error for load/save/export operations.
#[derive(Debug)]
pub enum StoreError {
    /// The file exists but cannot be read as tabular data (bad encoding,
    /// broken quoting, header without a `date` column). Fatal to the load
    /// attempt; presentation layers surface this as "cannot read data".
    StorageUnavailable { path: PathBuf, reason: String },
    /// Transport failure while reading or rewriting the file.
    Io(io::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable { path, reason } => {
                write!(f, "cannot read data at `{}`: {reason}", path.display())
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable { .. } => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

//! CSV ingestion
//!
//! One-shot bulk load of the bank-code export into storage. Rows are
//! normalized and written with insert-if-absent, so re-running the loader
//! over the same file leaves storage unchanged.
//!
//! Structural problems (unreadable source, missing header, short row) abort
//! the run with [`IngestError`]. A row that is not valid UTF-8, or whose
//! insert fails, is logged, counted in [`ImportSummary::failed`] and skipped.

pub mod csv_loader;
pub mod normalizer;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub use csv_loader::{ingest_csv_file, ingest_reader};
pub use normalizer::{normalize_fields, normalize_record, MalformedRecord, MIN_FIELDS};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open CSV file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV source has no header row")]
    MissingHeader,

    #[error("failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    #[error("failed to read CSV record {record}: {source}")]
    Read {
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("invalid CSV record {record}: {source}")]
    Malformed {
        record: u64,
        #[source]
        source: MalformedRecord,
    },
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: u64,
    /// Rows whose code was already present.
    pub skipped: u64,
    /// Rows whose insert failed and were logged.
    pub failed: u64,
}

impl ImportSummary {
    pub fn total(&self) -> u64 {
        self.inserted + self.skipped + self.failed
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} inserted, {} skipped, {} failed",
            self.total(),
            self.inserted,
            self.skipped,
            self.failed
        )
    }
}

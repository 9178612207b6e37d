//! SWIFT code registry
//!
//! Bulk-loads SWIFT/BIC bank identifier codes from a CSV export into a
//! relational table and serves them over a small REST API.
//!
//! ## Call chain
//! CSV file -> `loader` (normalize + insert-if-absent) -> `store`
//! HTTP request -> `api` -> `service` (headquarter/branch resolution) -> `store`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use swift_codes::{loader, MemoryStore, SwiftCodeService};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let summary = loader::ingest_csv_file(&*store, "swift.csv").await?;
//! println!("{summary}");
//!
//! let service = SwiftCodeService::new(store);
//! let lookup = service.get_by_code(" aaaabbplxxx ").await?;
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Record types and code helpers
pub mod models;

// Storage gateway port + in-process implementation
pub mod store;

// CSV ingestion pipeline
pub mod loader;

// Lookup resolver
pub mod service;

// PostgreSQL integration (when enabled)
#[cfg(feature = "database")]
pub mod database;

// REST API and process configuration (when enabled)
#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

pub use error::SwiftError;
pub use loader::{ImportSummary, IngestError};
pub use models::{CountrySwiftCodes, HeadquarterView, NewSwiftCode, SwiftCode, SwiftCodeLookup};
pub use service::SwiftCodeService;
pub use store::{InsertOutcome, MemoryStore, SwiftCodeStore};

#[cfg(feature = "database")]
pub use database::{DatabaseConfig, PgSwiftCodeStore};

//! Streaming CSV loader.

use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use super::{normalize_record, ImportSummary, IngestError};
use crate::store::{InsertOutcome, SwiftCodeStore};

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Row width is checked by the normalizer, not the csv parser.
    builder.has_headers(true).flexible(true);
    builder
}

/// Load a CSV export from disk.
pub async fn ingest_csv_file<S, P>(store: &S, path: P) -> Result<ImportSummary, IngestError>
where
    S: SwiftCodeStore + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Importing SWIFT codes from {}", path.display());
    ingest(store, reader).await
}

/// Load a CSV export from any byte source.
pub async fn ingest_reader<S, R>(store: &S, source: R) -> Result<ImportSummary, IngestError>
where
    S: SwiftCodeStore + ?Sized,
    R: io::Read,
{
    ingest(store, reader_builder().from_reader(source)).await
}

async fn ingest<S, R>(
    store: &S,
    mut reader: csv::Reader<R>,
) -> Result<ImportSummary, IngestError>
where
    S: SwiftCodeStore + ?Sized,
    R: io::Read,
{
    let headers = reader.headers().map_err(IngestError::Header)?;
    if headers.is_empty() {
        return Err(IngestError::MissingHeader);
    }
    debug!("CSV headers: {:?}", headers);

    let mut summary = ImportSummary::default();
    let mut record = csv::ByteRecord::new();
    let mut position: u64 = 0;

    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => position += 1,
            Ok(false) => break,
            Err(source) => {
                return Err(IngestError::Read {
                    record: position + 1,
                    source,
                })
            }
        }

        let row = normalize_record(&record).map_err(|source| IngestError::Malformed {
            record: position,
            source,
        })?;

        if let Err(e) = record.iter().try_for_each(|f| std::str::from_utf8(f).map(|_| ())) {
            warn!(
                "Skipping SWIFT code {} (record {}): {}",
                row.swift_code, position, e
            );
            summary.failed += 1;
            continue;
        }

        match store.insert_if_absent(&row).await {
            Ok(InsertOutcome::Inserted) => {
                debug!(
                    "Inserted SWIFT code {} for bank '{}'",
                    row.swift_code, row.bank_name
                );
                summary.inserted += 1;
            }
            Ok(InsertOutcome::Ignored) => {
                debug!("SWIFT code {} already present, skipping", row.swift_code);
                summary.skipped += 1;
            }
            Err(e) => {
                warn!(
                    "Failed to insert SWIFT code {} (record {}): {:#}",
                    row.swift_code, position, e
                );
                summary.failed += 1;
            }
        }
    }

    info!("Finished importing CSV data: {}", summary);
    Ok(summary)
}

//! Error types for lookup and mutation requests.
//!
//! Ingestion has its own fatal error type in [`crate::loader::IngestError`];
//! everything here is recoverable and surfaces as an HTTP status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwiftError {
    #[error("SWIFT code {0} not found")]
    CodeNotFound(String),

    #[error("SWIFT codes for country {0} not found")]
    CountryNotFound(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A read against storage failed.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] anyhow::Error),

    /// A write against storage failed, including unique-key violations.
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl SwiftError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::CodeNotFound(_) | Self::CountryNotFound(_) => 404,
            Self::MalformedInput(_) => 400,
            Self::StorageUnavailable(_) | Self::Storage(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CodeNotFound(_) | Self::CountryNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, SwiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_not_found() {
        assert_eq!(SwiftError::CodeNotFound("X".into()).http_status(), 404);
        assert_eq!(SwiftError::CountryNotFound("XX".into()).http_status(), 404);
    }

    #[test]
    fn http_status_malformed_input() {
        assert_eq!(SwiftError::MalformedInput("x".into()).http_status(), 400);
    }

    #[test]
    fn http_status_storage() {
        let read = SwiftError::StorageUnavailable(anyhow::anyhow!("down"));
        let write = SwiftError::Storage(anyhow::anyhow!("duplicate key"));
        assert_eq!(read.http_status(), 500);
        assert_eq!(write.http_status(), 500);
    }

    #[test]
    fn display_mentions_not_found() {
        let e = SwiftError::CodeNotFound("AAAABBPLXXX".into());
        assert_eq!(e.to_string(), "SWIFT code AAAABBPLXXX not found");
        assert!(SwiftError::CountryNotFound("XX".into())
            .to_string()
            .contains("not found"));
    }

    #[test]
    fn display_storage_includes_cause() {
        let e = SwiftError::Storage(anyhow::anyhow!("duplicate key value"));
        assert_eq!(e.to_string(), "storage error: duplicate key value");
    }
}

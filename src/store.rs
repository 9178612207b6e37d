//! Storage gateway port.
//!
//! The loader and the lookup resolver only talk to storage through
//! [`SwiftCodeStore`]. The PostgreSQL adapter lives in
//! [`crate::database`]; [`MemoryStore`] keeps rows in process and backs the
//! test suite.

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{NewSwiftCode, SwiftCode};

pub type StoreResult<T> = anyhow::Result<T>;

/// Outcome of an insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A row with the same code already existed; nothing was written.
    Ignored,
}

#[async_trait]
pub trait SwiftCodeStore: Send + Sync {
    /// Point lookup by exact (already normalized) code.
    async fn find_by_code(&self, swift_code: &str) -> StoreResult<Option<SwiftCode>>;

    /// Non-headquarter rows whose first 8 characters equal `prefix`.
    async fn find_branches(&self, prefix: &str) -> StoreResult<Vec<SwiftCode>>;

    /// Every row, in storage order.
    async fn list_all(&self) -> StoreResult<Vec<SwiftCode>>;

    async fn list_by_country(&self, country_iso2: &str) -> StoreResult<Vec<SwiftCode>>;

    /// Plain insert. A duplicate code is an error.
    async fn insert(&self, record: &NewSwiftCode) -> StoreResult<SwiftCode>;

    /// Insert unless the code already exists.
    async fn insert_if_absent(&self, record: &NewSwiftCode) -> StoreResult<InsertOutcome>;

    /// Returns the number of rows removed.
    async fn delete_by_code(&self, swift_code: &str) -> StoreResult<u64>;
}

#[derive(Debug, Default)]
struct MemoryRows {
    rows: Vec<SwiftCode>,
    next_id: i32,
}

impl MemoryRows {
    fn position(&self, swift_code: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.swift_code == swift_code)
    }

    fn push(&mut self, record: &NewSwiftCode) -> SwiftCode {
        self.next_id += 1;
        let row = record.clone().into_record(self.next_id);
        self.rows.push(row.clone());
        row
    }
}

/// In-process store with the same uniqueness rules as the `swift_codes` table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryRows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SwiftCodeStore for MemoryStore {
    async fn find_by_code(&self, swift_code: &str) -> StoreResult<Option<SwiftCode>> {
        let inner = self.inner.read().await;
        Ok(inner.position(swift_code).map(|idx| inner.rows[idx].clone()))
    }

    async fn find_branches(&self, prefix: &str) -> StoreResult<Vec<SwiftCode>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .filter(|r| !r.is_headquarter && r.institution_prefix() == prefix)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<SwiftCode>> {
        Ok(self.inner.read().await.rows.clone())
    }

    async fn list_by_country(&self, country_iso2: &str) -> StoreResult<Vec<SwiftCode>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .filter(|r| r.country_iso2 == country_iso2)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: &NewSwiftCode) -> StoreResult<SwiftCode> {
        let mut inner = self.inner.write().await;
        if inner.position(&record.swift_code).is_some() {
            return Err(anyhow!(
                "duplicate key value violates unique constraint: swift_code={}",
                record.swift_code
            ));
        }
        Ok(inner.push(record))
    }

    async fn insert_if_absent(&self, record: &NewSwiftCode) -> StoreResult<InsertOutcome> {
        let mut inner = self.inner.write().await;
        if inner.position(&record.swift_code).is_some() {
            return Ok(InsertOutcome::Ignored);
        }
        inner.push(record);
        Ok(InsertOutcome::Inserted)
    }

    async fn delete_by_code(&self, swift_code: &str) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.rows.len();
        inner.rows.retain(|r| r.swift_code != swift_code);
        Ok((before - inner.rows.len()) as u64)
    }
}

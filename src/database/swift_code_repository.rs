//! SWIFT code repository - `swift_codes` table access
//!
//! All SQL is runtime-checked (sqlx::query, not sqlx::query!) to avoid a
//! compile-time database requirement.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::{NewSwiftCode, SwiftCode};
use crate::store::{InsertOutcome, SwiftCodeStore};

const SELECT_COLUMNS: &str =
    "id, swift_code, bank_name, address, country_iso2, country_name, is_headquarter";

#[derive(Clone, Debug)]
pub struct PgSwiftCodeStore {
    pool: PgPool,
}

impl PgSwiftCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwiftCodeStore for PgSwiftCodeStore {
    async fn find_by_code(&self, swift_code: &str) -> Result<Option<SwiftCode>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM swift_codes WHERE swift_code = $1");
        sqlx::query_as::<_, SwiftCode>(&sql)
            .bind(swift_code)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get SWIFT code")
    }

    async fn find_branches(&self, prefix: &str) -> Result<Vec<SwiftCode>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM swift_codes \
             WHERE is_headquarter = false AND LEFT(swift_code, 8) = $1"
        );
        let branches = sqlx::query_as::<_, SwiftCode>(&sql)
            .bind(prefix)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list branches")?;
        debug!("Found {} branches for prefix {}", branches.len(), prefix);
        Ok(branches)
    }

    async fn list_all(&self) -> Result<Vec<SwiftCode>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM swift_codes");
        sqlx::query_as::<_, SwiftCode>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list SWIFT codes")
    }

    async fn list_by_country(&self, country_iso2: &str) -> Result<Vec<SwiftCode>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM swift_codes WHERE country_iso2 = $1");
        sqlx::query_as::<_, SwiftCode>(&sql)
            .bind(country_iso2)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list SWIFT codes by country")
    }

    async fn insert(&self, record: &NewSwiftCode) -> Result<SwiftCode> {
        let sql = format!(
            "INSERT INTO swift_codes \
             (swift_code, bank_name, address, country_iso2, country_name, is_headquarter) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {SELECT_COLUMNS}"
        );
        sqlx::query_as::<_, SwiftCode>(&sql)
            .bind(&record.swift_code)
            .bind(&record.bank_name)
            .bind(&record.address)
            .bind(&record.country_iso2)
            .bind(&record.country_name)
            .bind(record.is_headquarter())
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to create SWIFT code {}", record.swift_code))
    }

    async fn insert_if_absent(&self, record: &NewSwiftCode) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"INSERT INTO swift_codes (swift_code, bank_name, address, country_iso2, country_name, is_headquarter) VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (swift_code) DO NOTHING"#,
        )
        .bind(&record.swift_code)
        .bind(&record.bank_name)
        .bind(&record.address)
        .bind(&record.country_iso2)
        .bind(&record.country_name)
        .bind(record.is_headquarter())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to import SWIFT code {}", record.swift_code))?;

        Ok(if result.rows_affected() > 0 {
            InsertOutcome::Inserted
        } else {
            InsertOutcome::Ignored
        })
    }

    async fn delete_by_code(&self, swift_code: &str) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM swift_codes WHERE swift_code = $1"#)
            .bind(swift_code)
            .execute(&self.pool)
            .await
            .context("Failed to delete SWIFT code")?;
        Ok(result.rows_affected())
    }
}

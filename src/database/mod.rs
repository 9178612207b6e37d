//! Database connection and management module
//!
//! Connection pooling, the startup retry loop and the `swift_codes` table
//! bootstrap for the PostgreSQL-backed store.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

pub mod swift_code_repository;

pub use swift_code_repository::PgSwiftCodeStore;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    /// Total connection attempts at startup, including the first.
    pub connect_attempts: u32,
    /// Fixed pause between failed attempts.
    pub connect_backoff: Duration,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)), // 10 minutes
            max_lifetime: Some(Duration::from_secs(1800)), // 30 minutes
            connect_attempts: 20,
            connect_backoff: Duration::from_secs(2),
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        let mut pool_options = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connection_timeout);

        if let Some(idle_timeout) = self.idle_timeout {
            pool_options = pool_options.idle_timeout(idle_timeout);
        }

        if let Some(max_lifetime) = self.max_lifetime {
            pool_options = pool_options.max_lifetime(max_lifetime);
        }

        pool_options
    }
}

/// Run `op` up to `attempts` times, sleeping `backoff` between failures.
/// The error of the last attempt is returned.
pub async fn retry_with_backoff<T, E, F, Fut>(
    attempts: u32,
    backoff: Duration,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Open the pool, retrying while the database comes up.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        "Connecting to database: {}",
        mask_database_url(&config.database_url)
    );

    let pool = retry_with_backoff(config.connect_attempts, config.connect_backoff, |attempt| {
        let options = config.pool_options();
        let url = config.database_url.clone();
        let attempts = config.connect_attempts;
        async move {
            info!("Waiting for database... attempt {}/{}", attempt, attempts);
            options.connect(&url).await
        }
    })
    .await
    .map_err(|e| {
        warn!("Failed to connect to database: {}", e);
        e
    })?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Create `swift_codes` if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS swift_codes (
            id             SERIAL PRIMARY KEY,
            swift_code     TEXT NOT NULL UNIQUE,
            bank_name      TEXT NOT NULL,
            address        TEXT NOT NULL,
            country_iso2   TEXT NOT NULL,
            country_name   TEXT NOT NULL,
            is_headquarter BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE INDEX IF NOT EXISTS swift_codes_country_iso2_idx ON swift_codes (country_iso2)"#,
    )
    .execute(pool)
    .await?;

    info!("swift_codes schema ready");
    Ok(())
}

/// Mask sensitive information in database URL for logging
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut masked = parsed.clone();
        if parsed.password().is_some() {
            let _ = masked.set_password(Some("***"));
        }
        masked.to_string()
    } else {
        // If URL parsing fails, just mask the middle part
        let chars: Vec<char> = url.chars().collect();
        if chars.len() > 20 {
            let head: String = chars[..10].iter().collect();
            let tail: String = chars[chars.len() - 10..].iter().collect();
            format!("{}***{}", head, tail)
        } else {
            "***".to_string()
        }
    }
}

//! swift_api: SWIFT code registry REST server.
//!
//! Startup order: connect (with retries) -> ensure schema -> import CSV ->
//! serve. Any failure before serving exits the process.
//!
//! Configuration: see `swift_codes::config::ServerConfig` (`DB_URL` is
//! required).

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use swift_codes::api::build_router;
use swift_codes::config::ServerConfig;
use swift_codes::database::{connect_with_retry, ensure_schema, PgSwiftCodeStore};
use swift_codes::{loader, SwiftCodeService, SwiftCodeStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,swift_codes=debug,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::parse();

    let pool = connect_with_retry(&config.database_config())
        .await
        .context("Cannot connect to database")?;
    ensure_schema(&pool)
        .await
        .context("Failed to prepare swift_codes table")?;

    let store: Arc<dyn SwiftCodeStore> = Arc::new(PgSwiftCodeStore::new(pool));

    // Storage must be populated before the first request is served.
    let summary = loader::ingest_csv_file(&*store, &config.csv_path)
        .await
        .context("Failed to import CSV")?;
    tracing::info!("CSV import complete: {}", summary);

    let service = Arc::new(SwiftCodeService::new(store));
    let app = build_router(service);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("swift_api listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

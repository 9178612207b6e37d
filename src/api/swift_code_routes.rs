//! SWIFT code API routes
//!
//! ## Endpoints
//!
//! - `GET    /swift-codes`                - every record
//! - `GET    /swift-codes/:code`          - one record; headquarters embed `branches`
//! - `GET    /swift-codes/country/:iso2`  - all records for a country
//! - `POST   /swift-codes`                - create a record
//! - `DELETE /swift-codes/:code`          - delete a record
//!
//! Path parameters are trimmed and upper-cased before lookup.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

use super::error::ApiError;
use crate::error::SwiftError;
use crate::models::{CountrySwiftCodes, NewSwiftCode, SwiftCode, SwiftCodeLookup};
use crate::service::SwiftCodeService;

// ============================================================================
// Response Types
// ============================================================================

/// Confirmation body for create and delete
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /swift-codes
async fn list_swift_codes(
    State(service): State<Arc<SwiftCodeService>>,
) -> Result<Json<Vec<SwiftCode>>, ApiError> {
    let codes = service.get_all().await?;
    Ok(Json(codes))
}

/// GET /swift-codes/:code
async fn get_swift_code(
    State(service): State<Arc<SwiftCodeService>>,
    Path(code): Path<String>,
) -> Result<Json<SwiftCodeLookup>, ApiError> {
    debug!("Looking for SWIFT code: {}", code);
    let lookup = service.get_by_code(&code).await?;
    Ok(Json(lookup))
}

/// GET /swift-codes/country/:iso2
async fn get_swift_codes_by_country(
    State(service): State<Arc<SwiftCodeService>>,
    Path(iso2): Path<String>,
) -> Result<Json<CountrySwiftCodes>, ApiError> {
    let country = service.get_by_country(&iso2).await?;
    Ok(Json(country))
}

/// POST /swift-codes
///
/// Any body the JSON extractor rejects (bad syntax, wrong field types,
/// missing `swiftCode`) is reported as 400.
async fn create_swift_code(
    State(service): State<Arc<SwiftCodeService>>,
    payload: Result<Json<NewSwiftCode>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) =
        payload.map_err(|rejection| SwiftError::MalformedInput(rejection.body_text()))?;

    let created = service.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "SWIFT code created successfully".to_string(),
            swift_code: created.swift_code,
        }),
    ))
}

/// DELETE /swift-codes/:code
async fn delete_swift_code(
    State(service): State<Arc<SwiftCodeService>>,
    Path(code): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = service.delete_by_code(&code).await?;
    Ok(Json(MessageResponse {
        message: format!("SWIFT code {} deleted successfully", removed),
        swift_code: removed,
    }))
}

/// Create the SWIFT code router
pub fn create_swift_code_router(service: Arc<SwiftCodeService>) -> Router {
    Router::new()
        .route("/swift-codes", get(list_swift_codes).post(create_swift_code))
        .route(
            "/swift-codes/:code",
            get(get_swift_code).delete(delete_swift_code),
        )
        .route(
            "/swift-codes/country/:iso2",
            get(get_swift_codes_by_country),
        )
        .with_state(service)
}

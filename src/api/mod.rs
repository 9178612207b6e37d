//! REST API module
//!
//! HTTP endpoints over [`SwiftCodeService`]. Errors are converted to a status
//! code and an `{"error": ...}` body at the handler boundary.

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::service::SwiftCodeService;

pub mod error;
pub mod swift_code_routes;

pub use error::ApiError;
pub use swift_code_routes::{create_swift_code_router, MessageResponse};

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the full router with all routes and middleware.
pub fn build_router(service: Arc<SwiftCodeService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(create_swift_code_router(service))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

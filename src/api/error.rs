//! Handler-boundary error conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::SwiftError;

/// Wraps [`SwiftError`] so handlers can return it with `?`.
#[derive(Debug)]
pub struct ApiError(pub SwiftError);

impl From<SwiftError> for ApiError {
    fn from(err: SwiftError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Storage details go to the log, not the client.
        let message = match &self.0 {
            SwiftError::StorageUnavailable(e) => {
                error!("Storage read failed: {:#}", e);
                "Failed to fetch SWIFT codes".to_string()
            }
            SwiftError::Storage(e) => {
                error!("Storage write failed: {:#}", e);
                "Failed to modify SWIFT codes".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = ApiError(SwiftError::CodeNotFound("X".into())).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_malformed_input_maps_to_400() {
        let resp = ApiError(SwiftError::MalformedInput("bad json".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_maps_to_500() {
        let resp = ApiError(SwiftError::Storage(anyhow::anyhow!("duplicate key"))).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

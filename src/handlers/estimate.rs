//! Price estimation handler
//!
//! Validates the request body and asks the estimator for a price

use crate::handlers::AppState;
use crate::models::{PriceEstimateRequest, PriceEstimateResponse};
use crate::utils::error::helpers::{internal_error, validation_error};
use crate::utils::error::{AppResult, DESCRIPTION_REQUIRED, JSON_REQUIRED};
use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Estimate the price of an item
///
/// POST /estimate_price
///
/// Body: `{"description": "..."}`. Validation failures yield `400`,
/// provider failures `500`, both as `{"success": false, "error": ...}`.
pub async fn estimate_price(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<PriceEstimateResponse>> {
    debug!("Received estimate request ({} bytes)", body.len());

    let request = parse_request(&body)?;
    let description = request
        .description()
        .ok_or_else(|| validation_error(DESCRIPTION_REQUIRED))?;

    let estimated_price = state.estimator.estimate(&description).await?;

    Ok(Json(PriceEstimateResponse::success(estimated_price)))
}

/// Parse the body into a request; anything but a non-empty JSON object is rejected
fn parse_request(body: &[u8]) -> AppResult<PriceEstimateRequest> {
    let value: Value = serde_json::from_slice(body).map_err(|_| validation_error(JSON_REQUIRED))?;

    match &value {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(validation_error(JSON_REQUIRED)),
    }

    serde_json::from_value(value).map_err(|e| internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;

    fn rejection(body: &str) -> String {
        match parse_request(body.as_bytes()) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other.map(|r| r.description)),
        }
    }

    #[test]
    fn test_parse_request_rejects_non_objects() {
        for body in ["", "not json", "null", "{}", "[]", "false", "0", "\"\"", "[1]", "\"text\""] {
            assert_eq!(rejection(body), JSON_REQUIRED, "body: {:?}", body);
        }
    }

    #[test]
    fn test_parse_request_accepts_object() {
        let request = parse_request(r#"{"description": "中古のノートパソコン"}"#.as_bytes()).unwrap();
        assert_eq!(request.description().as_deref(), Some("中古のノートパソコン"));

        let request = parse_request(br#"{"other": true}"#).unwrap();
        assert_eq!(request.description(), None);
    }
}

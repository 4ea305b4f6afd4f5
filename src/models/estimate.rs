//! Price estimation data models
//!
//! Defines the request and response bodies of the public endpoints

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Price estimation request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceEstimateRequest {
    /// Item description; any JSON value is accepted
    #[serde(default)]
    pub description: Option<Value>,
}

impl PriceEstimateRequest {
    /// Description as prompt text
    ///
    /// Empty values (`null`, `""`, `false`, `0`, `[]`, `{}`) count as missing.
    /// Strings are used as-is, other values in their JSON form.
    pub fn description(&self) -> Option<String> {
        let value = self.description.as_ref()?;
        if is_empty_value(value) {
            return None;
        }

        Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Price estimation response body
///
/// Serialized as `{"success": true, "estimated_price": N}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceEstimateResponse {
    Success { estimated_price: i64 },
    Failure { error: String },
}

impl PriceEstimateResponse {
    pub fn success(estimated_price: i64) -> Self {
        Self::Success { estimated_price }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into() }
    }
}

impl Serialize for PriceEstimateResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PriceEstimateResponse", 2)?;
        match self {
            Self::Success { estimated_price } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("estimated_price", estimated_price)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

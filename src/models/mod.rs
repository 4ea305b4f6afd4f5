//! Data models module
//!
//! Defines the public request/response shapes and the Vertex AI wire format

pub mod estimate;
pub mod vertex;

pub use estimate::{HealthResponse, PriceEstimateRequest, PriceEstimateResponse};

//! Price Estimator Library
//!
//! Estimates item prices from free-text descriptions using Vertex AI Gemini

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use providers::{StaticGenerator, TextGenerator, VertexProvider};
pub use services::{extract_price, PriceEstimator};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{}", NAME, VERSION)
}

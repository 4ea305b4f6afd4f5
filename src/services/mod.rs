//! Service layer module
//!
//! Contains the price estimator and the text extraction fallback

pub mod estimator;
pub mod extract;

pub use estimator::{build_prompt, interpret_output, PriceEstimator};
pub use extract::{extract_price, DEFAULT_PRICE};

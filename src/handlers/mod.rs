//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod estimate;
pub mod health;

use crate::config::Settings;
use crate::middleware::{cors_middleware, request_logging_middleware};
use crate::providers::TextGenerator;
use crate::services::PriceEstimator;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub estimator: PriceEstimator,
}

/// Create application router
///
/// The generator is injected so tests can substitute a canned provider.
pub fn create_router(settings: &Settings, generator: Arc<dyn TextGenerator>) -> Router {
    let app_state = Arc::new(AppState {
        estimator: PriceEstimator::new(generator),
    });

    // Outermost first: CORS must also cover body-limit rejections.
    // DefaultBodyLimit lifts axum's 2 MiB extractor cap to the configured size.
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(cors_middleware))
        .layer(from_fn(request_logging_middleware))
        .layer(DefaultBodyLimit::max(settings.request.max_request_size))
        .layer(RequestBodyLimitLayer::new(settings.request.max_request_size));

    Router::new()
        .route(
            "/health_check",
            get(health::health_check).post(health::health_check),
        )
        .route(
            "/estimate_price",
            get(estimate::estimate_price).post(estimate::estimate_price),
        )
        .with_state(app_state)
        .layer(middleware_stack)
}

//! Health check handler

use crate::models::HealthResponse;
use axum::response::Json;
use tracing::debug;

/// Liveness check
///
/// GET/POST /health_check
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Executing health check");
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.0;
        assert_eq!(response.status, "healthy");
    }
}

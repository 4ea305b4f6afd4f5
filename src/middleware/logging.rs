//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Request logging middleware
///
/// Tags each request with an id and records its outcome and duration
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    async move {
        info!(
            "Request started: {} {} - Client: {}",
            method,
            uri,
            get_client_ip(&headers).unwrap_or_else(|| "unknown".to_string())
        );

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();
        let elapsed_ms = duration.as_secs_f64() * 1000.0;

        if status.is_server_error() {
            warn!("Server error: {} - Duration: {:.2}ms", status, elapsed_ms);
        } else if status.is_client_error() {
            warn!("Client error: {} - Duration: {:.2}ms", status, elapsed_ms);
        } else {
            info!("Request completed: {} - Duration: {:.2}ms", status, elapsed_ms);
        }

        // Model calls dominate; flag the unusually slow ones
        if duration.as_secs() > 10 {
            warn!(
                "Slow request detected: {} {} - Duration: {:.2}s",
                method,
                uri,
                duration.as_secs_f64()
            );
        }

        response
    }
    .instrument(span)
    .await
}

/// Get client IP address
fn get_client_ip(headers: &HeaderMap) -> Option<String> {
    let ip_headers = ["x-forwarded-for", "x-real-ip", "x-client-ip"];

    for header_name in &ip_headers {
        if let Some(ip_str) = headers.get(*header_name).and_then(|v| v.to_str().ok()) {
            // X-Forwarded-For may contain multiple IPs, take the first one
            if let Some(first_ip) = ip_str.split(',').next() {
                let ip = first_ip.trim();
                if !ip.is_empty() && ip != "unknown" {
                    return Some(ip.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_client_ip() {
        let mut headers = HeaderMap::new();

        headers.insert("x-forwarded-for", "192.168.1.1, 10.0.0.1".parse().unwrap());
        assert_eq!(get_client_ip(&headers), Some("192.168.1.1".to_string()));

        headers.clear();
        headers.insert("x-real-ip", "192.168.1.2".parse().unwrap());
        assert_eq!(get_client_ip(&headers), Some("192.168.1.2".to_string()));

        headers.clear();
        assert_eq!(get_client_ip(&headers), None);
    }
}

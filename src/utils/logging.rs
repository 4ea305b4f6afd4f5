//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::config::settings::LoggingConfig;

/// Truncate a string with a note about original length
///
/// Cuts on a character boundary so multi-byte text is safe to log.
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    let total = s.chars().count();
    if total > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}... ({} chars truncated)", head, total - max_chars)
    } else {
        s.to_string()
    }
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Tracing subscriber already set, keeping the existing one");
    }
}

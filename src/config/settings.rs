//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default GCE metadata endpoint for the attached service account token
pub const DEFAULT_METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Vertex AI configuration
    pub vertex: VertexConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Vertex AI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexConfig {
    /// GCP project identifier
    pub project_id: String,
    /// Region the model is served from
    pub location: String,
    /// Publisher model identifier
    pub model: String,
    /// API root, without the `/v1` suffix
    pub base_url: String,
    /// Static OAuth bearer token; the metadata server is queried when absent
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// Metadata server token endpoint
    pub metadata_token_url: String,
    /// Provider request timeout in seconds
    pub timeout: u64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter, in `EnvFilter` directive syntax
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .unwrap_or_else(|| "8080".to_string());

        let location = get("LOCATION", "asia-northeast1");
        let base_url = lookup("VERTEX_BASE_URL")
            .unwrap_or_else(|| format!("https://{}-aiplatform.googleapis.com", location));

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", "0.0.0.0"),
                port: port.parse().context("Invalid port number")?,
            },
            vertex: VertexConfig {
                project_id: get("PROJECT_ID", "xxxxxx"),
                location,
                model: get("GEMINI_MODEL", "gemini-1.5-flash"),
                base_url,
                access_token: lookup("GOOGLE_ACCESS_TOKEN").filter(|t| !t.trim().is_empty()),
                metadata_token_url: get("METADATA_TOKEN_URL", DEFAULT_METADATA_TOKEN_URL),
                timeout: get("PROVIDER_TIMEOUT", "60")
                    .parse()
                    .context("Invalid provider timeout")?,
            },
            request: RequestConfig {
                max_request_size: get("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.vertex.base_url.starts_with("http") {
            anyhow::bail!("Invalid Vertex AI base URL format, should start with 'http'");
        }

        if self.vertex.access_token.is_none() && !self.vertex.metadata_token_url.starts_with("http") {
            anyhow::bail!("Invalid metadata token URL format, should start with 'http'");
        }

        if self.vertex.timeout == 0 {
            anyhow::bail!("Provider timeout cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.level) {
            anyhow::bail!("Invalid log filter {:?}: {}", self.logging.level, e);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Full `generateContent` endpoint for the configured model
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.vertex.base_url.trim_end_matches('/'),
            self.vertex.project_id,
            self.vertex.location,
            self.vertex.model,
        )
    }

    /// Server listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

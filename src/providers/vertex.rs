//! Vertex AI Provider implementation
//!
//! Calls the Gemini `generateContent` method of Vertex AI

use super::{Generation, ProviderError, TextGenerator};
use crate::config::Settings;
use crate::models::vertex::*;
use crate::utils::logging::truncate_content;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Metadata tokens are refreshed this long before they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Where bearer tokens come from
#[derive(Debug, Clone)]
enum TokenSource {
    /// Pre-issued token from configuration
    Static(String),
    /// GCE/Cloud Run metadata server
    Metadata(String),
}

/// Vertex AI Gemini provider
#[derive(Debug, Clone)]
pub struct VertexProvider {
    client: Client,
    url: String,
    model: String,
    token_source: TokenSource,
    /// Last metadata token and the instant it goes stale
    cached_token: Arc<RwLock<Option<(String, Instant)>>>,
}

impl VertexProvider {
    /// Create a new provider from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.vertex.timeout))
            .user_agent(concat!("price-estimator/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let token_source = match &settings.vertex.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::Metadata(settings.vertex.metadata_token_url.clone()),
        };

        Ok(Self {
            client,
            url: settings.generate_content_url(),
            model: settings.vertex.model.clone(),
            token_source,
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Target `generateContent` URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve a bearer token for the next request
    ///
    /// Metadata tokens are reused until shortly before `expires_in` runs out.
    async fn access_token(&self) -> Result<String, ProviderError> {
        let metadata_url = match &self.token_source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::Metadata(url) => url,
        };

        if let Some(token) = fresh_token(self.cached_token.read().await.as_ref()) {
            return Ok(token);
        }

        let mut cached = self.cached_token.write().await;
        // Another request may have refreshed it while we waited for the lock
        if let Some(token) = fresh_token(cached.as_ref()) {
            return Ok(token);
        }

        let token = self.fetch_metadata_token(metadata_url).await?;
        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(0));
        let stale_at = Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN);
        *cached = Some((token.access_token.clone(), stale_at));

        Ok(token.access_token)
    }

    async fn fetch_metadata_token(&self, metadata_url: &str) -> Result<AccessTokenResponse, ProviderError> {
        debug!("Fetching access token from metadata server");

        let response = self
            .client
            .get(metadata_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| ProviderError::Auth(format!("metadata server unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!(
                "metadata server returned {}: {}",
                status, body
            )));
        }

        let token: AccessTokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Auth(format!("invalid token response: {}", e)))?;

        debug!(expires_in = ?token.expires_in, "Access token refreshed");
        Ok(token)
    }
}

fn fresh_token(cached: Option<&(String, Instant)>) -> Option<String> {
    match cached {
        Some((token, stale_at)) if Instant::now() < *stale_at => Some(token.clone()),
        _ => None,
    }
}

#[async_trait]
impl TextGenerator for VertexProvider {
    fn name(&self) -> &str {
        "vertex-ai"
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        let token = self.access_token().await?;
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending request to Vertex AI");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GoogleErrorResponse>(&body) {
                Ok(envelope) => envelope.error.message,
                Err(_) => body,
            };
            error!("Vertex AI request failed: {} - {}", status, truncate_content(&message, 200));
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(reason) = parsed.block_reason() {
            return Err(ProviderError::EmptyResponse(format!("prompt blocked ({})", reason)));
        }

        match parsed.text() {
            Some(text) => {
                debug!("Vertex AI output: {}", truncate_content(&text, 200));
                Ok(Generation { text })
            }
            None => {
                let reason = parsed
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .unwrap_or_else(|| "no candidates".to_string());
                Err(ProviderError::EmptyResponse(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_settings(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_source(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_provider_creation() {
        let provider = VertexProvider::new(&test_settings(&[("PROJECT_ID", "demo")]));
        assert!(provider.is_ok());

        let provider = provider.unwrap();
        assert_eq!(provider.name(), "vertex-ai");
        assert!(provider.url().contains("/projects/demo/"));
        assert!(matches!(provider.token_source, TokenSource::Metadata(_)));
    }

    #[tokio::test]
    async fn test_static_token() {
        let provider =
            VertexProvider::new(&test_settings(&[("GOOGLE_ACCESS_TOKEN", "ya29.token")])).unwrap();
        assert_eq!(provider.access_token().await.unwrap(), "ya29.token");
        assert!(provider.cached_token.read().await.is_none());
    }

    #[test]
    fn test_fresh_token() {
        let now = Instant::now();
        let live = ("ya29.live".to_string(), now + Duration::from_secs(30));
        let stale = ("ya29.stale".to_string(), now);

        assert_eq!(fresh_token(Some(&live)).as_deref(), Some("ya29.live"));
        assert_eq!(fresh_token(Some(&stale)), None);
        assert_eq!(fresh_token(None), None);
    }
}

//! Provider module
//!
//! Defines the text generation trait and its implementations

pub mod mock;
pub mod vertex;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure reaching the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status
    #[error("Vertex AI API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Access token could not be obtained
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response body could not be decoded
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Provider returned no usable text
    #[error("Model returned no text: {0}")]
    EmptyResponse(String),
}

/// Result of a single generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Raw model output
    pub text: String,
}

/// Trait for text generation providers
///
/// Implementations must be shareable across request handlers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Generate one completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError>;
}

pub use mock::StaticGenerator;
pub use vertex::VertexProvider;

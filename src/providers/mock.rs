//! Canned provider for tests and local runs

use super::{Generation, ProviderError, TextGenerator};
use async_trait::async_trait;
use std::sync::Mutex;

enum Reply {
    Text(String),
    Error(String),
}

/// Provider that always answers with the same output
pub struct StaticGenerator {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl StaticGenerator {
    /// Always return `text` as the model output
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with an API error carrying `message`
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Error(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    fn name(&self) -> &str {
        "static"
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            Reply::Text(text) => Ok(Generation { text: text.clone() }),
            Reply::Error(message) => Err(ProviderError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_prompts() {
        let generator = StaticGenerator::with_text("42");

        let generation = generator.generate("first").await.unwrap();
        assert_eq!(generation.text, "42");

        generator.generate("second").await.unwrap();
        assert_eq!(generator.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_error_reply() {
        let generator = StaticGenerator::with_error("quota exceeded");
        let err = generator.generate("x").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}

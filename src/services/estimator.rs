//! Price estimation service
//!
//! Builds the prompt, calls the model provider and turns its output into a price

use super::extract::extract_price;
use crate::providers::{ProviderError, TextGenerator};
use crate::utils::logging::truncate_content;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Price estimator backed by a text generation provider
#[derive(Clone)]
pub struct PriceEstimator {
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for PriceEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceEstimator")
            .field("generator", &self.generator.name())
            .finish()
    }
}

impl PriceEstimator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Estimate the price of the described item in yen
    pub async fn estimate(&self, description: &str) -> Result<i64, ProviderError> {
        let prompt = build_prompt(description);

        debug!(
            "Estimating price via {} for: {}",
            self.generator.name(),
            truncate_content(description, 100)
        );

        let generation = self.generator.generate(&prompt).await?;
        let price = interpret_output(&generation.text);

        info!("💴 Estimated price: {}", price);
        Ok(price)
    }
}

/// Prompt asking for a yen price as a single JSON object
pub fn build_prompt(description: &str) -> String {
    format!(
        "以下の商品の価格を日本円で推測してください。\n\
         一般的な市場価格を参考に、できるだけ正確な価格を提示してください。\n\
         \n\
         商品: {}\n\
         \n\
         回答は以下のJSON形式のみで返してください：\n\
         {{\"estimated_price\": 価格（数値のみ）}}\n",
        description
    )
}

/// Turn raw model output into a price
///
/// Structured output wins; anything else goes through [`extract_price`].
pub fn interpret_output(text: &str) -> i64 {
    match parse_structured(text) {
        Some(price) => price,
        None => {
            debug!("Model output is not a JSON object, extracting price from text");
            extract_price(text)
        }
    }
}

/// `estimated_price` of a JSON object reply; `None` when the reply is not an object
fn parse_structured(text: &str) -> Option<i64> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;
    let object = value.as_object()?;

    Some(object.get("estimated_price").map(price_from_value).unwrap_or(0))
}

fn price_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Value::String(s) => extract_price(s),
        _ => 0,
    }
}

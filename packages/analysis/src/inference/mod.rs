//! The inference seam: a trait over remote LLM completion.
//!
//! The pipeline talks to this trait so applications and tests can swap the
//! provider without touching extraction or normalization logic.

pub mod openrouter;

use async_trait::async_trait;

use crate::error::InferenceResult;

pub use openrouter::OpenRouterClient;

/// Tuning for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    /// Tuning for structured field extraction: near-deterministic, small
    /// response ceiling.
    pub fn extraction(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.1,
            max_tokens: 2000,
        }
    }

    /// Tuning for the comparison narrative: same temperature, larger
    /// ceiling because the output is long-form prose.
    pub fn comparison(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.1,
            max_tokens: 4000,
        }
    }
}

/// A remote LLM completion provider.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Send one prompt as a single user-role message and return the first
    /// completion's text.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> InferenceResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_tuning() {
        let options = CompletionOptions::extraction("anthropic/claude-sonnet-4");
        assert_eq!(options.max_tokens, 2000);
        assert!(options.temperature <= 0.2);
    }

    #[test]
    fn test_comparison_tuning_has_larger_ceiling() {
        let extraction = CompletionOptions::extraction("m");
        let comparison = CompletionOptions::comparison("m");
        assert!(comparison.max_tokens > extraction.max_tokens);
        assert_eq!(comparison.temperature, extraction.temperature);
    }
}

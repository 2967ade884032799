//! Testing utilities including a mock inference provider.
//!
//! Useful for testing applications that use the pipeline without making
//! real provider calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{InferenceError, InferenceResult};
use crate::inference::{CompletionOptions, Inference};

/// Record of one completion call made against the mock.
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub prompt: String,
    pub options: CompletionOptions,
}

/// How the mock should fail, when failure is scripted.
#[derive(Debug, Clone)]
pub enum MockFailure {
    MissingApiKey,
    EmptyCompletion,
    Api { status: u16, body: String },
}

impl MockFailure {
    fn to_error(&self) -> InferenceError {
        match self {
            Self::MissingApiKey => InferenceError::MissingApiKey,
            Self::EmptyCompletion => InferenceError::EmptyCompletion,
            Self::Api { status, body } => InferenceError::Api {
                status: *status,
                body: body.clone(),
            },
        }
    }
}

/// A mock inference provider with scripted, deterministic completions.
///
/// Responses are served in order from a queue; prompt-substring matchers
/// take precedence when they hit. With nothing scripted the mock returns
/// `{}`, which normalizes to the all-defaults analysis.
#[derive(Default, Clone)]
pub struct MockInference {
    /// Scripted completions served in order
    responses: Arc<RwLock<VecDeque<String>>>,

    /// (prompt substring, completion) pairs checked before the queue
    matchers: Arc<RwLock<Vec<(String, String)>>>,

    /// Scripted failure for every call
    failure: Arc<RwLock<Option<MockFailure>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<RecordedCompletion>>>,
}

impl MockInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completion to serve for the next unmatched call.
    pub fn with_response(self, completion: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(completion.into());
        self
    }

    /// Serve `completion` whenever the prompt contains `substring`.
    pub fn with_response_for(
        self,
        substring: impl Into<String>,
        completion: impl Into<String>,
    ) -> Self {
        self.matchers
            .write()
            .unwrap()
            .push((substring.into(), completion.into()));
        self
    }

    /// Make every call fail with the given mode.
    pub fn failing_with(self, failure: MockFailure) -> Self {
        *self.failure.write().unwrap() = Some(failure);
        self
    }

    /// Make every call fail with an empty completion.
    pub fn failing(self) -> Self {
        self.failing_with(MockFailure::EmptyCompletion)
    }

    /// All calls made against this mock.
    pub fn calls(&self) -> Vec<RecordedCompletion> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made against this mock.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl Inference for MockInference {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> InferenceResult<String> {
        self.calls.write().unwrap().push(RecordedCompletion {
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        if let Some(failure) = self.failure.read().unwrap().as_ref() {
            return Err(failure.to_error());
        }

        let matched = self
            .matchers
            .read()
            .unwrap()
            .iter()
            .find(|(substring, _)| prompt.contains(substring.as_str()))
            .map(|(_, completion)| completion.clone());
        if let Some(completion) = matched {
            return Ok(completion);
        }

        if let Some(completion) = self.responses.write().unwrap().pop_front() {
            return Ok(completion);
        }

        Ok("{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_serve_in_order() {
        let mock = MockInference::new()
            .with_response("first")
            .with_response("second");
        let options = CompletionOptions::extraction("test-model");

        assert_eq!(mock.complete("p1", &options).await.unwrap(), "first");
        assert_eq!(mock.complete("p2", &options).await.unwrap(), "second");
        assert_eq!(mock.complete("p3", &options).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_matcher_takes_precedence() {
        let mock = MockInference::new()
            .with_response("queued")
            .with_response_for("comparison", "narrative text");
        let options = CompletionOptions::comparison("test-model");

        let completion = mock.complete("the comparison prompt", &options).await.unwrap();
        assert_eq!(completion, "narrative text");
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let mock = MockInference::new().failing();
        let options = CompletionOptions::extraction("test-model");

        let err = mock.complete("p", &options).await.unwrap_err();
        assert!(matches!(err, InferenceError::EmptyCompletion));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_records_options() {
        let mock = MockInference::new();
        let options = CompletionOptions::comparison("test-model");
        mock.complete("p", &options).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].options.max_tokens, 4000);
    }
}

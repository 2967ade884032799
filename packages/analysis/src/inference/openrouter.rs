//! OpenRouter implementation of the [`Inference`] trait.
//!
//! One POST per call to the provider's chat-completion endpoint; no retry
//! or backoff. Whether transient provider failures should be retried is an
//! open policy question for the deployment, not decided here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::credentials::InferenceCredentials;
use crate::error::{InferenceError, InferenceResult};
use crate::inference::{CompletionOptions, Inference};

/// HTTP client for the OpenRouter chat-completion API.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    credentials: InferenceCredentials,
}

impl OpenRouterClient {
    /// Create a client with injected credentials.
    pub fn new(credentials: InferenceCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
        }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> InferenceResult<Self> {
        Ok(Self::new(InferenceCredentials::from_env()?))
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Override the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_model(model);
        self
    }

    /// The model configured for this client.
    pub fn model(&self) -> &str {
        &self.credentials.model
    }
}

#[async_trait]
impl Inference for OpenRouterClient {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> InferenceResult<String> {
        // Fail fast: never hit the network without a key.
        if self.credentials.api_key.is_empty() {
            return Err(InferenceError::MissingApiKey);
        }

        let request = ChatRequest {
            model: options.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.credentials.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.api_key.expose()),
            )
            .header("HTTP-Referer", &self.credentials.referer)
            .header("X-Title", &self.credentials.title)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| InferenceError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Http(Box::new(e)))?;

        // A choice without content text is as useless as no choice at all.
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(InferenceError::EmptyCompletion)
    }
}

// Request/Response types

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

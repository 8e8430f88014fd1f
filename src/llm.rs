//! The chat-completion boundary.
//!
//! The rest of the crate depends only on the [`ChatClient`] capability:
//! send a model identifier and an ordered list of role/content messages, get
//! response text back. [`OpenAiClient`] implements it against any
//! OpenAI-compatible `/v1/chat/completions` endpoint.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

/// Default chat completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Message role accepted by the completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Task-framing instructions
    System,
    /// The request content itself
    User,
}

/// One message in a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Sender role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Capability to create one chat completion.
///
/// Call sites receive this as an explicitly passed dependency, so they can
/// be exercised in tests without network access.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends one completion request and returns the raw response text.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat completion API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Creates a new client for the given endpoint and bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(Error::HttpClientBuild)?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let request_body = ChatRequest { model, messages };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(Error::LlmRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::LlmApi(error_text));
        }

        let parsed: ChatResponse = response.json().await.map_err(Error::LlmResponse)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(Error::LlmEmpty)
    }
}

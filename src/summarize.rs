//! One-paragraph summaries of note content.

use crate::error::Result;
use crate::llm::{ChatClient, ChatMessage};
use crate::prompt::{self, PromptConfig};
use tracing::warn;

/// Outcome of one summarize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Summary text, or an error description when the call failed
    pub text: String,

    /// True when `text` embeds an error instead of a model summary
    pub degraded: bool,
}

/// Compresses one note's content into a short paragraph via the LLM.
///
/// A failed call is contained here: the returned text embeds the error
/// description so the batch keeps going, and the digest shows what broke.
pub struct Summarizer<'a> {
    client: &'a dyn ChatClient,
    config: PromptConfig,
}

impl<'a> Summarizer<'a> {
    /// Creates a summarizer over the given client and prompt configuration.
    #[must_use]
    pub fn new(client: &'a dyn ChatClient, config: PromptConfig) -> Self {
        Self { client, config }
    }

    /// Summarizes one note's content.
    ///
    /// Never fails; any error from the remote call degrades to a synthetic
    /// summary string embedding the error description.
    pub async fn summarize(&self, content: &str) -> Summary {
        match self.request(content).await {
            Ok(text) => Summary {
                text,
                degraded: false,
            },
            Err(e) => {
                warn!("Summarize call failed: {e}");
                Summary {
                    text: format!("Error summarizing content: {e}"),
                    degraded: true,
                }
            }
        }
    }

    async fn request(&self, content: &str) -> Result<String> {
        let user_message = prompt::render(&self.config.user_message, &[("content", content)])?;
        let messages = [
            ChatMessage::system(&self.config.system_message),
            ChatMessage::user(user_message),
        ];

        let response = self.client.complete(&self.config.model, &messages).await?;
        Ok(response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockChatClient;

    #[tokio::test]
    async fn test_summarize_returns_trimmed_response() {
        let client = MockChatClient::replying("  A short summary.\n");
        let summarizer = Summarizer::new(&client, PromptConfig::summarize_default());

        let summary = summarizer.summarize("Some article body.").await;

        assert_eq!(summary.text, "A short summary.");
        assert!(!summary.degraded);
    }

    #[tokio::test]
    async fn test_summarize_substitutes_content() {
        let client = MockChatClient::replying("ok");
        let summarizer = Summarizer::new(&client, PromptConfig::summarize_default());

        summarizer.summarize("the actual note body").await;

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        let user_message = &calls[0].1[1];
        assert!(user_message.content.contains("the actual note body"));
        assert!(!user_message.content.contains("{content}"));
    }

    #[tokio::test]
    async fn test_summarize_failure_embeds_error() {
        let client = MockChatClient::failing("connection refused");
        let summarizer = Summarizer::new(&client, PromptConfig::summarize_default());

        let summary = summarizer.summarize("body").await;

        assert!(summary.degraded);
        assert!(summary.text.starts_with("Error summarizing content:"));
        assert!(summary.text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_summarize_bad_template_degrades() {
        let client = MockChatClient::replying("unused");
        let config = PromptConfig {
            user_message: "Summarize {body}".to_string(),
            ..PromptConfig::summarize_default()
        };
        let summarizer = Summarizer::new(&client, config);

        let summary = summarizer.summarize("text").await;

        assert!(summary.degraded);
        assert_eq!(client.call_count(), 0);
    }
}

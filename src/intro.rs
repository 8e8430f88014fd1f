//! The digest's introductory paragraph.

use crate::article::ArticleRecord;
use crate::error::Result;
use crate::llm::{ChatClient, ChatMessage};
use crate::prompt::{self, PromptConfig};
use tracing::warn;

/// Introduction used when the generation call fails.
pub const FALLBACK_INTRODUCTION: &str = "This post summarizes my recent readings on various topics, providing insights and key takeaways.";

/// Writes the first-person framing paragraph over a whole run's articles.
///
/// This is the single per-run call site: it runs exactly once, after every
/// note has been summarized and classified.
pub struct IntroductionGenerator<'a> {
    client: &'a dyn ChatClient,
    config: PromptConfig,
}

impl<'a> IntroductionGenerator<'a> {
    /// Creates a generator over the given client and prompt configuration.
    #[must_use]
    pub fn new(client: &'a dyn ChatClient, config: PromptConfig) -> Self {
        Self { client, config }
    }

    /// Generates the introduction for the processed articles.
    ///
    /// Never fails; any error degrades to [`FALLBACK_INTRODUCTION`].
    pub async fn generate(&self, articles: &[ArticleRecord]) -> String {
        match self.request(articles).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Introduction call failed: {e}");
                FALLBACK_INTRODUCTION.to_string()
            }
        }
    }

    async fn request(&self, articles: &[ArticleRecord]) -> Result<String> {
        let topics = distinct_topics(articles).join(", ");
        let article_context = articles
            .iter()
            .map(|article| {
                format!(
                    "Title: {}, Topic: {}, Summary: {}",
                    article.title, article.topic, article.summary
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let user_message = prompt::render(&self.config.user_message, &[
            ("topics", topics.as_str()),
            ("article_context", article_context.as_str()),
        ])?;
        let messages = [
            ChatMessage::system(&self.config.system_message),
            ChatMessage::user(user_message),
        ];

        let response = self.client.complete(&self.config.model, &messages).await?;
        Ok(response.trim().to_string())
    }
}

/// Distinct topics in first-seen order.
fn distinct_topics(articles: &[ArticleRecord]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for article in articles {
        if !topics.contains(&article.topic) {
            topics.push(article.topic.clone());
        }
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockChatClient;

    fn articles() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord {
                title: "First".to_string(),
                url: "https://example.com/1".to_string(),
                summary: "About agents.".to_string(),
                topic: "AI".to_string(),
            },
            ArticleRecord {
                title: "Second".to_string(),
                url: "https://example.com/2".to_string(),
                summary: "About teams.".to_string(),
                topic: "Management".to_string(),
            },
            ArticleRecord {
                title: "Third".to_string(),
                url: "https://example.com/3".to_string(),
                summary: "More agents.".to_string(),
                topic: "AI".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_response() {
        let client = MockChatClient::replying("  This week I read widely.  ");
        let generator = IntroductionGenerator::new(&client, PromptConfig::introduce_default());

        let intro = generator.generate(&articles()).await;

        assert_eq!(intro, "This week I read widely.");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_builds_context_from_all_articles() {
        let client = MockChatClient::replying("ok");
        let generator = IntroductionGenerator::new(&client, PromptConfig::introduce_default());

        generator.generate(&articles()).await;

        let calls = client.calls();
        let user_message = &calls[0].1[1].content;
        assert!(user_message.contains("Title: First, Topic: AI, Summary: About agents."));
        assert!(user_message.contains("Title: Second, Topic: Management, Summary: About teams."));
        assert!(user_message.contains("Title: Third, Topic: AI, Summary: More agents."));
    }

    #[tokio::test]
    async fn test_generate_deduplicates_topics() {
        let client = MockChatClient::replying("ok");
        let generator = IntroductionGenerator::new(&client, PromptConfig::introduce_default());

        generator.generate(&articles()).await;

        let calls = client.calls();
        let user_message = &calls[0].1[1].content;
        assert!(user_message.contains("AI, Management"));
        assert!(!user_message.contains("AI, Management, AI"));
    }

    #[tokio::test]
    async fn test_generate_failure_uses_fallback_sentence() {
        let client = MockChatClient::failing("service unavailable");
        let generator = IntroductionGenerator::new(&client, PromptConfig::introduce_default());

        let intro = generator.generate(&articles()).await;

        assert_eq!(intro, FALLBACK_INTRODUCTION);
    }
}

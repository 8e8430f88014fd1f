//! Topic classification with strict validation.
//!
//! With a fixed topic list the model must answer with an exact member;
//! anything else is tagged rather than trusted. Without a list the model
//! classifies openly. Call failures are contained and surface as the
//! fallback label at the digest boundary.

use crate::error::{Error, Result};
use crate::llm::{ChatClient, ChatMessage};
use crate::prompt::{self, PromptConfig};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Label articles fall back to when classification cannot be trusted.
pub const FALLBACK_TOPIC: &str = "Others";

/// Broad category examples offered to the model in open mode.
const OPEN_TOPIC_EXAMPLES: &str = "Technology, AI, Management, Science, Society, Culture";

/// What to do when the topics file is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicPolicy {
    /// Classify openly, letting the model pick a free-text topic
    #[default]
    Open,

    /// Treat a missing topics file as a fatal configuration error
    Required,
}

/// Loads the fixed topic list, one topic per non-blank line.
///
/// Returns `None` when the file is absent (or empty) and the policy is
/// [`TopicPolicy::Open`]; the pipeline then classifies openly.
///
/// # Errors
///
/// Returns a configuration error when the file is absent under
/// [`TopicPolicy::Required`], or an IO error when it exists but cannot be
/// read.
pub fn load_topics(path: &Path, policy: TopicPolicy) -> Result<Option<Vec<String>>> {
    if !path.exists() {
        return match policy {
            TopicPolicy::Open => {
                warn!(
                    "Topics file not found at {}; classifying openly",
                    path.display()
                );
                Ok(None)
            }
            TopicPolicy::Required => Err(Error::config(format!(
                "Topics configuration file not found at {}",
                path.display()
            ))),
        };
    }

    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let topics: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if topics.is_empty() {
        return match policy {
            TopicPolicy::Open => {
                warn!("Topics file {} is empty; classifying openly", path.display());
                Ok(None)
            }
            TopicPolicy::Required => Err(Error::config(format!(
                "Topics configuration file {} contains no topics",
                path.display()
            ))),
        };
    }

    Ok(Some(topics))
}

/// Tagged outcome of one classification.
///
/// The digest only ever sees [`Classification::label`]; the tag keeps an
/// out-of-list model answer distinguishable from a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The answer passed validation (or open mode accepted it)
    Matched(String),

    /// Fixed-list mode: the model answered outside the allowed set
    Unlisted(String),

    /// The call itself failed
    Failed(String),
}

impl Classification {
    /// The topic label to file the article under.
    ///
    /// `Unlisted` and `Failed` both map to [`FALLBACK_TOPIC`] here, at the
    /// presentation boundary.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Matched(topic) => topic,
            Self::Unlisted(_) | Self::Failed(_) => FALLBACK_TOPIC,
        }
    }

    /// Returns true when the label is a validated model answer.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Assigns one topic to a (title, summary) pair via the LLM.
pub struct Classifier<'a> {
    client: &'a dyn ChatClient,
    config: PromptConfig,
    topics: Option<Vec<String>>,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier; `topics` of `None` selects open mode.
    #[must_use]
    pub fn new(
        client: &'a dyn ChatClient,
        config: PromptConfig,
        topics: Option<Vec<String>>,
    ) -> Self {
        Self {
            client,
            config,
            topics,
        }
    }

    /// Classifies one article.
    ///
    /// Never fails; a call error is contained and tagged
    /// [`Classification::Failed`].
    pub async fn classify(&self, title: &str, summary: &str) -> Classification {
        match self.request(title, summary).await {
            Ok(answer) => self.validate(answer),
            Err(e) => {
                warn!("Classify call failed for '{title}': {e}");
                Classification::Failed(e.to_string())
            }
        }
    }

    async fn request(&self, title: &str, summary: &str) -> Result<String> {
        let topic_list = match &self.topics {
            Some(topics) => topics.join(", "),
            None => format!("{OPEN_TOPIC_EXAMPLES}, or any other topic that fits better"),
        };

        let user_message = prompt::render(&self.config.user_message, &[
            ("topics", topic_list.as_str()),
            ("title", title),
            ("summary", summary),
        ])?;
        let messages = [
            ChatMessage::system(&self.config.system_message),
            ChatMessage::user(user_message),
        ];

        let response = self.client.complete(&self.config.model, &messages).await?;
        Ok(response.trim().to_string())
    }

    fn validate(&self, answer: String) -> Classification {
        match &self.topics {
            Some(topics) if topics.iter().any(|topic| *topic == answer) => {
                Classification::Matched(answer)
            }
            Some(_) => Classification::Unlisted(answer),
            None if answer.is_empty() => {
                Classification::Failed("model returned an empty topic".to_string())
            }
            None => Classification::Matched(answer),
        }
    }
}

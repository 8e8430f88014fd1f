//! Prompt configuration for the LLM tasks.
//!
//! Each task (summarize, classify, introduce) carries a model identifier, a
//! system message, and a user-message template with `{placeholder}` slots.
//! Configurations load from YAML files and degrade to built-in defaults when
//! the file is missing or unparsable; configuration problems never abort a
//! run.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Model used when neither a prompt file nor `OPENAI_MODEL` overrides it.
pub const DEFAULT_MODEL: &str = "gpt-4o";

const SUMMARIZE_SYSTEM: &str = "You are a helpful assistant.";
const SUMMARIZE_USER: &str = "Summarize the following text in one paragraph, using less than 500 chars. Provide the summary in English:\n\n{content}";

const CLASSIFY_SYSTEM: &str =
    "You are an AI classifier that categorizes articles into specific topics.";
const CLASSIFY_USER: &str =
    "Classify the following article into one of the topics: {topics}.\n\nTitle: {title}\n\nSummary: {summary}";

const INTRODUCE_SYSTEM: &str = "You are a really experienced and creative assistant that writes introductions for blog posts. You are really able to get to the core of the content and provide a concise summary.";
const INTRODUCE_USER: &str = "Every week you write an update post of recent readings. Provide a two sentences long introduction. Try to be really concise, use first person, consider the {topics} and the provided highlights of articles:\n\n{article_context}";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Configuration for one LLM task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptConfig {
    /// Model identifier sent with the request
    pub model: String,

    /// System message establishing the task persona
    pub system_message: String,

    /// User-message template with named `{placeholder}` slots
    pub user_message: String,
}

impl PromptConfig {
    /// Default configuration for the summarize task.
    ///
    /// Template placeholder: `{content}`.
    #[must_use]
    pub fn summarize_default() -> Self {
        Self {
            model: default_model(),
            system_message: SUMMARIZE_SYSTEM.to_string(),
            user_message: SUMMARIZE_USER.to_string(),
        }
    }

    /// Default configuration for the classify task.
    ///
    /// Template placeholders: `{topics}`, `{title}`, `{summary}`.
    #[must_use]
    pub fn classify_default() -> Self {
        Self {
            model: default_model(),
            system_message: CLASSIFY_SYSTEM.to_string(),
            user_message: CLASSIFY_USER.to_string(),
        }
    }

    /// Default configuration for the introduction task.
    ///
    /// Template placeholders: `{topics}`, `{article_context}`.
    #[must_use]
    pub fn introduce_default() -> Self {
        Self {
            model: default_model(),
            system_message: INTRODUCE_SYSTEM.to_string(),
            user_message: INTRODUCE_USER.to_string(),
        }
    }

    /// Loads a configuration from a YAML file, falling back to `default`.
    ///
    /// A missing file is the normal case and returns the default silently.
    /// A file that exists but cannot be read or parsed logs a warning and
    /// returns the default; it never propagates an error.
    #[must_use]
    pub fn load_or(path: &Path, default: Self) -> Self {
        if !path.exists() {
            debug!("No prompt config at {}, using defaults", path.display());
            return default;
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Failed to read prompt config {}: {e}. Using defaults.",
                    path.display()
                );
                return default;
            }
        };

        match serde_yaml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to parse prompt config {}: {e}. Using defaults.",
                    path.display()
                );
                default
            }
        }
    }
}

fn default_model() -> String {
    env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
}

/// Substitutes `{name}` placeholders in a user-message template.
///
/// Every placeholder appearing in the template must have a value in
/// `values`; an unresolved placeholder is an error rather than being left
/// in the rendered text.
///
/// # Errors
///
/// Returns [`Error::Template`] naming the first placeholder without a
/// supplied value.
pub fn render(template: &str, values: &[(&str, &str)]) -> Result<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let span = captures.get(0).expect("capture group 0 always exists");
        let name = &captures[1];

        rendered.push_str(&template[last..span.start()]);
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => rendered.push_str(value),
            None => return Err(Error::template(name)),
        }
        last = span.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_load_missing_file_returns_default() {
        let default = PromptConfig::summarize_default();
        let loaded = PromptConfig::load_or(Path::new("/nonexistent/prompts/summarize.yaml"), default.clone());

        assert_eq!(loaded, default);
    }

    #[test]
    fn test_load_valid_yaml() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("summarize.yaml");
        file.write_str(
            "model: gpt-4o-mini\nsystem_message: Be terse.\nuser_message: \"Summarize: {content}\"\n",
        )
        .unwrap();

        let loaded = PromptConfig::load_or(file.path(), PromptConfig::summarize_default());

        assert_eq!(loaded.model, "gpt-4o-mini");
        assert_eq!(loaded.system_message, "Be terse.");
        assert_eq!(loaded.user_message, "Summarize: {content}");
    }

    #[test]
    fn test_load_invalid_yaml_returns_default() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("broken.yaml");
        file.write_str(": not [ valid yaml {").unwrap();

        let default = PromptConfig::introduce_default();
        let loaded = PromptConfig::load_or(file.path(), default.clone());

        assert_eq!(loaded, default);
    }

    #[test]
    fn test_load_yaml_missing_field_returns_default() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("partial.yaml");
        file.write_str("model: gpt-4o\n").unwrap();

        let default = PromptConfig::classify_default();
        let loaded = PromptConfig::load_or(file.path(), default.clone());

        assert_eq!(loaded, default);
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let rendered = render("Classify into {topics}: {title}", &[
            ("topics", "AI, Rust"),
            ("title", "A Post"),
        ])
        .unwrap();

        assert_eq!(rendered, "Classify into AI, Rust: A Post");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let rendered = render("{word} and {word}", &[("word", "again")]).unwrap();
        assert_eq!(rendered, "again and again");
    }

    #[test]
    fn test_render_missing_value_is_loud() {
        let result = render("Summarize:\n\n{content}", &[("topics", "AI")]);

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Template { ref placeholder } if placeholder == "content"));
    }

    #[test]
    fn test_render_without_placeholders_is_identity() {
        let rendered = render("No slots here.", &[]).unwrap();
        assert_eq!(rendered, "No slots here.");
    }

    #[test]
    fn test_default_templates_render() {
        let summarize = PromptConfig::summarize_default();
        assert!(render(&summarize.user_message, &[("content", "text")]).is_ok());

        let classify = PromptConfig::classify_default();
        assert!(
            render(&classify.user_message, &[
                ("topics", "AI"),
                ("title", "t"),
                ("summary", "s"),
            ])
            .is_ok()
        );

        let introduce = PromptConfig::introduce_default();
        assert!(
            render(&introduce.user_message, &[
                ("topics", "AI"),
                ("article_context", "ctx"),
            ])
            .is_ok()
        );
    }
}

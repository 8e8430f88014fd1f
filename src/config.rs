use crate::classify::TopicPolicy;
use crate::error::{Error, Result};
use regex::Regex;
use std::path::PathBuf;

/// Default lookback window in days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Default output directory for digests.
pub const DEFAULT_OUTPUT_DIR: &str = "./summaries";

/// Default directory holding the topics file and prompt configurations.
pub const DEFAULT_CONF_DIR: &str = ".conf";

/// Default file-name exclusion patterns (inbox prefix, PDF captures).
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["^000", r"\.pdf$"];

const TOPICS_FILE: &str = "topics.conf";
const SUMMARIZE_PROMPT_FILE: &str = "summarize.yaml";
const CLASSIFY_PROMPT_FILE: &str = "classify.yaml";
const INTRODUCE_PROMPT_FILE: &str = "introduction.yaml";

/// Configuration for one digest run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory containing reading note files
    pub notes_dir: PathBuf,

    /// Lookback window in days
    pub lookback_days: u32,

    /// Directory the digest is written into
    pub output_dir: PathBuf,

    /// Regex patterns of file names to exclude from the scan
    pub exclude_patterns: Vec<String>,

    /// Directory holding `topics.conf` and the prompt configuration files
    pub conf_dir: PathBuf,

    /// Behavior when the topics file is absent
    pub topic_policy: TopicPolicy,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use wrapup::Config;
    ///
    /// let config = Config::builder()
    ///     .notes_dir("./notes")
    ///     .lookback_days(14)
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// The notes directory is deliberately not checked here; its absence is
    /// a scan-time error so library callers can build configurations ahead
    /// of the directory existing.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclusion pattern is not a valid regex.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.exclude_patterns {
            Regex::new(pattern)
                .map_err(|e| Error::invalid_pattern(pattern.as_str(), e.to_string()))?;
        }
        Ok(())
    }

    /// Path to the fixed topic list.
    #[must_use]
    pub fn topics_path(&self) -> PathBuf {
        self.conf_dir.join(TOPICS_FILE)
    }

    /// Path to the summarize prompt configuration.
    #[must_use]
    pub fn summarize_prompt_path(&self) -> PathBuf {
        self.conf_dir.join(SUMMARIZE_PROMPT_FILE)
    }

    /// Path to the classify prompt configuration.
    #[must_use]
    pub fn classify_prompt_path(&self) -> PathBuf {
        self.conf_dir.join(CLASSIFY_PROMPT_FILE)
    }

    /// Path to the introduction prompt configuration.
    #[must_use]
    pub fn introduce_prompt_path(&self) -> PathBuf {
        self.conf_dir.join(INTRODUCE_PROMPT_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: PathBuf::from("."),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            conf_dir: PathBuf::from(DEFAULT_CONF_DIR),
            topic_policy: TopicPolicy::default(),
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    notes_dir: Option<PathBuf>,
    lookback_days: Option<u32>,
    output_dir: Option<PathBuf>,
    exclude_patterns: Option<Vec<String>>,
    conf_dir: Option<PathBuf>,
    topic_policy: Option<TopicPolicy>,
}

impl ConfigBuilder {
    /// Sets the directory containing reading note files.
    #[must_use]
    pub fn notes_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.notes_dir = Some(path.into());
        self
    }

    /// Sets the lookback window in days.
    #[must_use]
    pub fn lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = Some(days);
        self
    }

    /// Sets the directory the digest is written into.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the file-name exclusion patterns (regex).
    #[must_use]
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = Some(patterns);
        self
    }

    /// Sets the configuration directory.
    #[must_use]
    pub fn conf_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.conf_dir = Some(path.into());
        self
    }

    /// Sets the topic policy.
    #[must_use]
    pub fn topic_policy(mut self, policy: TopicPolicy) -> Self {
        self.topic_policy = Some(policy);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let config = Config {
            notes_dir: self.notes_dir.unwrap_or(defaults.notes_dir),
            lookback_days: self.lookback_days.unwrap_or(defaults.lookback_days),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            exclude_patterns: self.exclude_patterns.unwrap_or(defaults.exclude_patterns),
            conf_dir: self.conf_dir.unwrap_or(defaults.conf_dir),
            topic_policy: self.topic_policy.unwrap_or(defaults.topic_policy),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::builder().build().unwrap();

        assert_eq!(config.lookback_days, DEFAULT_LOOKBACK_DAYS);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.exclude_patterns, vec!["^000", r"\.pdf$"]);
        assert_eq!(config.topic_policy, TopicPolicy::Open);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .notes_dir("/tmp/notes")
            .lookback_days(30)
            .output_dir("/tmp/out")
            .exclude_patterns(vec!["^draft".to_string()])
            .topic_policy(TopicPolicy::Required)
            .build()
            .unwrap();

        assert_eq!(config.notes_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.exclude_patterns, vec!["^draft"]);
        assert_eq!(config.topic_policy, TopicPolicy::Required);
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = Config::builder()
            .exclude_patterns(vec!["[unclosed".to_string()])
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_conf_dir_paths() {
        let config = Config::builder().conf_dir("/etc/wrapup").build().unwrap();

        assert_eq!(config.topics_path(), PathBuf::from("/etc/wrapup/topics.conf"));
        assert_eq!(
            config.summarize_prompt_path(),
            PathBuf::from("/etc/wrapup/summarize.yaml")
        );
        assert_eq!(
            config.classify_prompt_path(),
            PathBuf::from("/etc/wrapup/classify.yaml")
        );
        assert_eq!(
            config.introduce_prompt_path(),
            PathBuf::from("/etc/wrapup/introduction.yaml")
        );
    }
}

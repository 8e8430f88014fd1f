use crate::article::ArticleRecord;
use crate::classify::{self, Classifier};
use crate::config::Config;
use crate::digest::{DigestWriter, TopicGroups};
use crate::error::Result;
use crate::intro::IntroductionGenerator;
use crate::llm::ChatClient;
use crate::metadata::Metadata;
use crate::prompt::PromptConfig;
use crate::scanner::Scanner;
use crate::summarize::Summarizer;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Statistics collected during one digest run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Files selected by the scan
    pub files_selected: usize,

    /// Articles processed into the digest
    pub articles: usize,

    /// Distinct topics in the digest
    pub topics: usize,

    /// Summaries that degraded to an error string
    pub degraded_summaries: usize,

    /// Articles filed under the fallback topic
    pub fallback_classifications: usize,

    /// Total execution time
    pub duration: Duration,

    /// Path of the written digest, if one was produced
    pub output_path: Option<PathBuf>,
}

impl PipelineStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        match &self.output_path {
            Some(path) => {
                println!(
                    "Processed {} of {} file(s) into {} topic(s) in {:.1}s",
                    self.articles,
                    self.files_selected,
                    self.topics,
                    self.duration.as_secs_f64()
                );
                if self.degraded_summaries > 0 {
                    println!("  {} summary call(s) degraded", self.degraded_summaries);
                }
                if self.fallback_classifications > 0 {
                    println!(
                        "  {} article(s) filed under \"Others\"",
                        self.fallback_classifications
                    );
                }
                println!("Digest saved to {}", path.display());
            }
            None => println!("No files found."),
        }
    }
}

/// Runs the full scan → summarize/classify → introduce → write sequence.
///
/// Files are processed strictly one at a time; every LLM call is awaited
/// before the next begins.
pub struct Pipeline<'a> {
    config: Config,
    client: &'a dyn ChatClient,
}

impl<'a> Pipeline<'a> {
    /// Creates a new pipeline over a validated configuration and a chat
    /// completion client.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config, client: &'a dyn ChatClient) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, client })
    }

    /// Executes the pipeline and returns statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the notes directory is missing, the topics file
    /// is required but absent, or the digest cannot be written. Remote-call
    /// failures never surface here; they degrade per file (summaries embed
    /// the error, classifications fall back to "Others") or per run (the
    /// introduction falls back to a fixed sentence).
    #[instrument(skip(self), fields(notes_dir = %self.config.notes_dir.display()))]
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!(
            "Searching for files in '{}' modified in the last {} days",
            self.config.notes_dir.display(),
            self.config.lookback_days
        );
        let files = Scanner::new(&self.config)?.scan()?;

        if files.is_empty() {
            info!("No files found.");
            return Ok(PipelineStats {
                files_selected: 0,
                articles: 0,
                topics: 0,
                degraded_summaries: 0,
                fallback_classifications: 0,
                duration: start_time.elapsed(),
                output_path: None,
            });
        }

        info!("Found {} file(s)", files.len());
        for file in &files {
            debug!(" - {}", file.path.display());
        }

        let topics = classify::load_topics(&self.config.topics_path(), self.config.topic_policy)?;

        let summarizer = Summarizer::new(
            self.client,
            PromptConfig::load_or(
                &self.config.summarize_prompt_path(),
                PromptConfig::summarize_default(),
            ),
        );
        let classifier = Classifier::new(
            self.client,
            PromptConfig::load_or(
                &self.config.classify_prompt_path(),
                PromptConfig::classify_default(),
            ),
            topics,
        );
        let generator = IntroductionGenerator::new(
            self.client,
            PromptConfig::load_or(
                &self.config.introduce_prompt_path(),
                PromptConfig::introduce_default(),
            ),
        );

        info!("Generating summaries and classifications");
        let mut groups = TopicGroups::new();
        let mut articles: Vec<ArticleRecord> = Vec::new();
        let mut degraded_summaries = 0;
        let mut fallback_classifications = 0;

        for file in &files {
            let content = match fs::read_to_string(&file.path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping unreadable file {}: {e}", file.path.display());
                    continue;
                }
            };

            let metadata = Metadata::parse(&content);
            let title = metadata.title().to_string();
            let url = metadata.url().to_string();

            let summary = summarizer.summarize(&content).await;
            if summary.degraded {
                degraded_summaries += 1;
            }

            let classification = classifier.classify(&title, &summary.text).await;
            if !classification.is_matched() {
                fallback_classifications += 1;
            }

            let record = ArticleRecord {
                title,
                url,
                summary: summary.text,
                topic: classification.label().to_string(),
            };
            groups.push(&record.topic, record.summary_line());
            articles.push(record);
        }

        if articles.is_empty() {
            warn!("No file could be read; nothing to write");
            return Ok(PipelineStats {
                files_selected: files.len(),
                articles: 0,
                topics: 0,
                degraded_summaries,
                fallback_classifications,
                duration: start_time.elapsed(),
                output_path: None,
            });
        }

        info!("Generating introduction");
        let introduction = generator.generate(&articles).await;

        info!("Saving digest");
        let output_path = DigestWriter::new(&self.config.output_dir).write(&groups, &introduction)?;

        Ok(PipelineStats {
            files_selected: files.len(),
            articles: articles.len(),
            topics: groups.len(),
            degraded_summaries,
            fallback_classifications,
            duration: start_time.elapsed(),
            output_path: Some(output_path),
        })
    }
}

//! # wrapup
//!
//! Turn a folder of reading notes into a weekly link-blog digest.
//!
//! ## Features
//!
//! - Selects note files modified within a lookback window
//! - Extracts front-matter metadata (title, URL) with sane defaults
//! - Summarizes and topic-classifies each note through an LLM
//! - Generates a first-person introduction over the whole batch
//! - Writes one dated Markdown digest, grouped by topic
//!
//! ## Quick Start
//!
//! ```no_run
//! use wrapup::{Config, OpenAiClient, Pipeline, DEFAULT_API_URL};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .notes_dir("./notes")
//!     .output_dir("./summaries")
//!     .build()?;
//!
//! let client = OpenAiClient::new(DEFAULT_API_URL, std::env::var("OPENAI_API_KEY")?)?;
//! let stats = Pipeline::new(config, &client)?.run().await?;
//! stats.print_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is a sequential pipeline:
//! 1. **Scanner**: selects recently modified files, honoring exclusions
//! 2. **Metadata**: extracts title and URL from each note's front matter
//! 3. **Summarizer / Classifier**: one LLM call each per note
//! 4. **IntroductionGenerator**: one LLM call over the whole batch
//! 5. **DigestWriter**: renders the grouped Markdown digest
//!
//! Remote-call failures degrade in place (error-bearing summary text, the
//! "Others" topic, a fixed introduction) instead of aborting the batch.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod article;
mod classify;
mod config;
mod digest;
mod error;
mod intro;
mod llm;
mod metadata;
mod pipeline;
mod prompt;
mod scanner;
mod summarize;

pub use article::ArticleRecord;
pub use classify::{Classification, Classifier, FALLBACK_TOPIC, TopicPolicy, load_topics};
pub use config::{
    Config, ConfigBuilder, DEFAULT_CONF_DIR, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_LOOKBACK_DAYS,
    DEFAULT_OUTPUT_DIR,
};
pub use digest::{DigestWriter, TopicGroups};
pub use error::{Error, Result};
pub use intro::{FALLBACK_INTRODUCTION, IntroductionGenerator};
pub use llm::{ChatClient, ChatMessage, DEFAULT_API_URL, OpenAiClient, Role};
pub use metadata::{DEFAULT_TITLE, DEFAULT_URL, Metadata};
pub use pipeline::{Pipeline, PipelineStats};
pub use prompt::{DEFAULT_MODEL, PromptConfig, render};
pub use scanner::NoteFile;
pub use summarize::{Summarizer, Summary};

/// Runs the complete digest pipeline with the given configuration and
/// client.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The notes directory doesn't exist
/// - The topics file is required but missing
/// - The digest file cannot be written
pub async fn run(config: Config, client: &dyn ChatClient) -> Result<PipelineStats> {
    Pipeline::new(config, client)?.run().await
}

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wrapup::{
    Config, DEFAULT_API_URL, DEFAULT_CONF_DIR, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_OUTPUT_DIR,
    OpenAiClient, Pipeline, TopicPolicy,
};

#[derive(Parser, Debug)]
#[command(
    name = "wrapup",
    version,
    about = "Review and summarize recent reading files",
    long_about = "Scan a folder of reading notes, summarize and topic-classify each recently \
    modified file through an LLM, and write a dated Markdown digest ready to publish on a \
    link blog.\n\n\
    The OpenAI API key is read from OPENAI_API_KEY, loaded from <conf-dir>/openai.conf \
    (dotenv format) or the environment.\n\n\
    USAGE EXAMPLES:\n  \
      # Digest the last week of notes\n  \
      wrapup ./notes\n\n  \
      # A monthly wrap-up into a custom folder\n  \
      wrapup ./notes --days 31 --output-dir ./posts\n\n  \
      # Skip drafts and insist on the fixed topic list\n  \
      wrapup ./notes --exclude '^draft' --require-topics"
)]
struct Cli {
    /// Directory containing your reading files
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Number of days to review
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Directory to save the Markdown file
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, value_name = "PATH")]
    output_dir: PathBuf,

    /// Regex patterns of file names to exclude (repeatable)
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Directory holding topics.conf, openai.conf and prompt configurations
    #[arg(long, default_value = DEFAULT_CONF_DIR, value_name = "PATH")]
    conf_dir: PathBuf,

    /// Fail when topics.conf is missing instead of classifying openly
    #[arg(long)]
    require_topics: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Environment from <conf-dir>/openai.conf, with a plain .env fallback.
    if dotenvy::from_path(cli.conf_dir.join("openai.conf")).is_err() {
        dotenvy::dotenv().ok();
    }

    let api_key = std::env::var("OPENAI_API_KEY").context(
        "OPENAI_API_KEY is not set. Please define it in the conf directory's openai.conf file",
    )?;
    let api_url =
        std::env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = OpenAiClient::new(api_url, api_key)
        .context("Failed to build the chat completion client")?;

    let exclude = if cli.exclude.is_empty() {
        DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    } else {
        cli.exclude
    };

    let config = Config::builder()
        .notes_dir(cli.directory)
        .lookback_days(cli.days)
        .output_dir(cli.output_dir)
        .exclude_patterns(exclude)
        .conf_dir(cli.conf_dir)
        .topic_policy(if cli.require_topics {
            TopicPolicy::Required
        } else {
            TopicPolicy::Open
        })
        .build()
        .context("Failed to build configuration")?;

    let stats = Pipeline::new(config, &client)
        .context("Failed to create pipeline")?
        .run()
        .await
        .context("Pipeline execution failed")?;

    stats.print_summary();

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("wrapup=info"),
        1 => EnvFilter::new("wrapup=debug"),
        _ => EnvFilter::new("wrapup=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();
}

//! Topic grouping and Markdown digest output.

use crate::error::{Error, Result};
use chrono::Local;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tag stamped into every digest's front matter.
const DIGEST_TAG: &str = "link-blog";

/// Summary lines grouped by topic, preserving first-seen topic order.
#[derive(Debug, Clone, Default)]
pub struct TopicGroups {
    order: Vec<String>,
    groups: HashMap<String, Vec<String>>,
}

impl TopicGroups {
    /// Creates an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a formatted summary line under a topic.
    ///
    /// A topic's position in the digest is fixed by the first line pushed
    /// under it.
    pub fn push(&mut self, topic: &str, line: String) {
        if !self.groups.contains_key(topic) {
            self.order.push(topic.to_string());
        }
        self.groups.entry(topic.to_string()).or_default().push(line);
    }

    /// Number of topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no lines were pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates topics and their lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order.iter().map(|topic| {
            (
                topic.as_str(),
                self.groups
                    .get(topic)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            )
        })
    }
}

/// Renders grouped summaries into the dated Markdown digest file.
pub struct DigestWriter {
    output_dir: PathBuf,
}

impl DigestWriter {
    /// Creates a writer targeting the given output directory.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Writes the digest and returns its path.
    ///
    /// The output directory is created if missing. The file is named
    /// `wrapped_up_readings_<YYYY-MM-DD>.md` after the current local date
    /// and replaces any previous same-day digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn write(&self, groups: &TopicGroups, introduction: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;

        let today = Local::now().format("%Y-%m-%d").to_string();
        let path = self
            .output_dir
            .join(format!("wrapped_up_readings_{today}.md"));

        let content = render(groups, introduction, &today);
        write_file_atomic(&path, &content)?;

        info!("Digest saved to {}", path.display());
        Ok(path)
    }
}

/// Renders the digest body: front matter, introduction, then one level-2
/// section per topic in insertion order.
fn render(groups: &TopicGroups, introduction: &str, date: &str) -> String {
    let mut out = String::new();

    out.push_str("---\n");
    out.push_str(&format!("title: Wrapped-up readings {date}\n"));
    out.push_str(&format!("date: {date}\n"));
    out.push_str("tags:\n");
    out.push_str(&format!("  - {DIGEST_TAG}\n"));
    out.push_str("---\n\n");

    out.push_str(introduction);
    out.push_str("\n\n");

    for (topic, lines) in groups.iter() {
        out.push_str(&format!("## {topic}\n\n"));
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Writes content to a temporary file, syncs it, then renames into place.
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    drop(temp_file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

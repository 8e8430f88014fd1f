//! The per-note unit of work.

/// One fully processed reading note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Article title from the note's metadata
    pub title: String,

    /// Link target from the note's metadata
    pub url: String,

    /// LLM-produced summary (possibly a degraded error string)
    pub summary: String,

    /// Topic label the article was filed under
    pub topic: String,
}

impl ArticleRecord {
    /// Renders the digest line for this article.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("- [{}]({}): {}", self.title, self.url, self.summary)
    }
}

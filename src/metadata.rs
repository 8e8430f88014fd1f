//! Front-matter extraction for reading note files.
//!
//! Notes carry an optional `---`-delimited key/value block at the top and,
//! anywhere in the body, an optional `- URL: https://...` line left by the
//! capture workflow. The URL line wins over a `url` key in the block.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Title used when a note declares none.
pub const DEFAULT_TITLE: &str = "Untitled Article";

/// Link target used when a note declares none.
pub const DEFAULT_URL: &str = "#";

static FRONT_MATTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)---(.*?)---").unwrap());

static URL_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)- URL:\s*(https?://\S+)").unwrap());

/// Key/value metadata extracted from one note's content.
///
/// Keys are lower-cased; values are trimmed of whitespace and surrounding
/// double quotes. Missing `title` and `url` fall back to fixed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: HashMap<String, String>,
}

impl Metadata {
    /// Parses metadata out of raw note content.
    ///
    /// The first `---` ... `---` block is scanned line by line; each line is
    /// split on its first `:`. Lines without a `:` are skipped. A
    /// `- URL: <http(s) url>` line anywhere in the content overrides the
    /// block's `url` key.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut fields = HashMap::new();

        if let Some(block) = FRONT_MATTER.captures(content) {
            for line in block[1].lines() {
                if let Some((key, value)) = line.split_once(':') {
                    fields.insert(
                        key.trim().to_lowercase(),
                        value.trim().trim_matches('"').to_string(),
                    );
                }
            }
        }

        if let Some(found) = URL_LINE.captures(content) {
            fields.insert("url".to_string(), found[1].to_string());
        }

        Self { fields }
    }

    /// Returns the raw value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns the note's title, or [`DEFAULT_TITLE`] when absent.
    #[must_use]
    pub fn title(&self) -> &str {
        self.get("title").unwrap_or(DEFAULT_TITLE)
    }

    /// Returns the note's link target, or [`DEFAULT_URL`] when absent.
    #[must_use]
    pub fn url(&self) -> &str {
        self.get("url").unwrap_or(DEFAULT_URL)
    }

    /// Number of extracted keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no keys were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_with_quotes() {
        let content = "---\ntitle: \"Rust in Production\"\nurl: \"https://example.com/rust\"\n---\nBody text.";
        let meta = Metadata::parse(content);

        assert_eq!(meta.title(), "Rust in Production");
        assert_eq!(meta.url(), "https://example.com/rust");
    }

    #[test]
    fn test_parse_unquoted_values() {
        let content = "---\ntitle: Plain Title\nauthor: Someone\n---";
        let meta = Metadata::parse(content);

        assert_eq!(meta.title(), "Plain Title");
        assert_eq!(meta.get("author"), Some("Someone"));
    }

    #[test]
    fn test_keys_are_lowercased() {
        let content = "---\nTitle: Mixed Case\nURL: https://example.com\n---";
        let meta = Metadata::parse(content);

        assert_eq!(meta.title(), "Mixed Case");
        assert_eq!(meta.url(), "https://example.com");
    }

    #[test]
    fn test_defaults_when_keys_missing() {
        let content = "---\nauthor: Someone\ndate: 2024-01-01\n---";
        let meta = Metadata::parse(content);

        assert_eq!(meta.title(), DEFAULT_TITLE);
        assert_eq!(meta.url(), DEFAULT_URL);
        assert_eq!(meta.get("author"), Some("Someone"));
    }

    #[test]
    fn test_no_block_yields_defaults_only() {
        let meta = Metadata::parse("Just some body text without front matter.");

        assert!(meta.is_empty());
        assert_eq!(meta.title(), DEFAULT_TITLE);
        assert_eq!(meta.url(), DEFAULT_URL);
    }

    #[test]
    fn test_url_line_overrides_block_url() {
        let content = "---\ntitle: Note\nurl: https://old.example.com\n---\n\nHighlights:\n- URL: https://new.example.com/article\n";
        let meta = Metadata::parse(content);

        assert_eq!(meta.url(), "https://new.example.com/article");
    }

    #[test]
    fn test_url_line_is_case_insensitive() {
        let content = "No front matter here.\n- url: http://example.org/x\n";
        let meta = Metadata::parse(content);

        assert_eq!(meta.url(), "http://example.org/x");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = "---\ntitle: Ok\nthis line has no separator\n---";
        let meta = Metadata::parse(content);

        assert_eq!(meta.len(), 1);
        assert_eq!(meta.title(), "Ok");
    }

    #[test]
    fn test_value_split_on_first_colon_only() {
        let content = "---\nurl: https://example.com:8080/page\n---";
        let meta = Metadata::parse(content);

        assert_eq!(meta.url(), "https://example.com:8080/page");
    }
}

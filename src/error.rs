use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the wrapup library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The notes directory does not exist or is not a directory.
    #[error("Notes directory not found: '{path}'")]
    DirectoryNotFound {
        /// The missing directory
        path: PathBuf,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// Invalid file exclusion pattern.
    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The invalid pattern
        pattern: String,
        /// Reason why it's invalid
        message: String,
    },

    /// A prompt template references a placeholder with no supplied value.
    #[error("Prompt template references '{{{placeholder}}}' but no value was supplied")]
    Template {
        /// Name of the unresolved placeholder
        placeholder: String,
    },

    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    HttpClientBuild(reqwest::Error),

    /// Failed to send a request to the chat completion API.
    #[error("Failed to send request to the chat completion API: {0}")]
    LlmRequest(reqwest::Error),

    /// The chat completion API answered with a non-success status.
    #[error("Chat completion API returned an error: {0}")]
    LlmApi(String),

    /// Failed to deserialize the chat completion response body.
    #[error("Failed to deserialize chat completion response: {0}")]
    LlmResponse(reqwest::Error),

    /// The chat completion response contained no choices.
    #[error("Chat completion response contained no choices")]
    LlmEmpty,
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates a missing-placeholder template error.
    #[must_use]
    pub fn template(placeholder: impl Into<String>) -> Self {
        Self::Template {
            placeholder: placeholder.into(),
        }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns true if this error came from the chat completion boundary.
    #[must_use]
    pub const fn is_llm(&self) -> bool {
        matches!(
            self,
            Self::LlmRequest(_) | Self::LlmApi(_) | Self::LlmResponse(_) | Self::LlmEmpty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("test message");
        assert!(err.is_config());
        assert!(err.to_string().contains("test message"));
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("/tmp/test.txt", io_err);
        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/test.txt"));
    }

    #[test]
    fn test_directory_not_found_display() {
        let err = Error::DirectoryNotFound {
            path: PathBuf::from("/tmp/missing"),
        };
        assert!(err.to_string().contains("/tmp/missing"));
        assert!(!err.is_io());
    }

    #[test]
    fn test_template_error_names_placeholder() {
        let err = Error::template("content");
        assert!(err.to_string().contains("{content}"));
    }

    #[test]
    fn test_llm_api_error() {
        let err = Error::LlmApi("quota exceeded".to_string());
        assert!(err.is_llm());
        assert!(err.to_string().contains("quota exceeded"));
    }
}

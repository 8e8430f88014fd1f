//! Selection of recently modified note files.

use crate::config::Config;
use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// One selected note file.
#[derive(Debug, Clone)]
pub struct NoteFile {
    /// Path to the file
    pub path: PathBuf,

    /// Last modification time
    pub modified: SystemTime,
}

/// Lists regular files in the notes directory whose modification time falls
/// within the lookback window, honoring exclusion patterns.
///
/// The scan is a single directory level; subdirectories are never entered.
pub(crate) struct Scanner {
    notes_dir: PathBuf,
    lookback_days: u32,
    exclude: Vec<Regex>,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclusion pattern is not a valid regex.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let exclude = config
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| Error::invalid_pattern(pattern.as_str(), e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            notes_dir: config.notes_dir.clone(),
            lookback_days: config.lookback_days,
            exclude,
        })
    }

    /// Scans the notes directory and returns the matching files.
    ///
    /// Files come back in directory-listing order; no sorting is applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if the notes directory does not
    /// exist, or an IO error if the listing fails partway.
    pub(crate) fn scan(&self) -> Result<Vec<NoteFile>> {
        if !self.notes_dir.is_dir() {
            return Err(Error::DirectoryNotFound {
                path: self.notes_dir.clone(),
            });
        }

        let window = Duration::from_secs(u64::from(self.lookback_days) * SECONDS_PER_DAY);
        let cutoff = SystemTime::now()
            .checked_sub(window)
            .unwrap_or(UNIX_EPOCH);

        let mut selected = Vec::new();

        for entry in fs::read_dir(&self.notes_dir).map_err(|e| Error::io(&self.notes_dir, e))? {
            let entry = entry.map_err(|e| Error::io(&self.notes_dir, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            if self.exclude.iter().any(|pattern| pattern.is_match(&file_name)) {
                trace!("Excluding {file_name} by pattern");
                continue;
            }

            let metadata = entry.metadata().map_err(|e| Error::io(entry.path(), e))?;
            let modified = metadata.modified().map_err(|e| Error::io(entry.path(), e))?;
            if modified >= cutoff {
                selected.push(NoteFile {
                    path: entry.path(),
                    modified,
                });
            }
        }

        debug!(
            "Selected {} file(s) from {} within {} day(s)",
            selected.len(),
            self.notes_dir.display(),
            self.lookback_days
        );

        Ok(selected)
    }
}

use tracing::debug;

use super::fsutil::read_message;
use super::repo::Repository;
use crate::error::GvtError;

/// One line of `history` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub version: u64,
    /// First line of the version's message.
    pub summary: String,
}

/// A version together with its complete message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: u64,
    pub message: String,
}

impl Repository {
    /// Walk from the last version back towards 0, newest first, yielding at
    /// most `limit` entries when given.
    ///
    /// # Errors
    /// `SystemFailure` as soon as a message cannot be read; no partial
    /// history is returned.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>, GvtError> {
        let last = self.last_version()?;
        let take = limit.unwrap_or(usize::MAX);

        let mut entries = Vec::new();
        for version in (0..=last).rev().take(take) {
            let message = read_message(&self.version_dir(version))?;
            let summary = message.lines().next().unwrap_or_default().to_string();
            entries.push(HistoryEntry { version, summary });
        }
        debug!(entries = entries.len(), ?limit, "read history");
        Ok(entries)
    }

    /// Full message of `version`, or of the last version when `None`.
    ///
    /// # Errors
    /// `InvalidVersion` if the version or its message is missing.
    pub fn show_version(&self, version: Option<u64>) -> Result<VersionInfo, GvtError> {
        let version = match version {
            Some(v) => v,
            None => self.last_version()?,
        };
        let message = read_message(&self.version_dir(version))
            .map_err(|_| GvtError::invalid_version(version))?;
        Ok(VersionInfo { version, message })
    }
}

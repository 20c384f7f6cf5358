use std::path::PathBuf;

use tracing::{debug, info};

use super::fsutil::{copy_file, list_files};
use super::repo::Repository;
use crate::error::GvtError;

impl Repository {
    /// Paths stored in `version`, relative to the repository root, sorted.
    ///
    /// # Errors
    /// `InvalidVersion` if the version does not exist, `SystemFailure` on I/O errors.
    pub fn tracked_files(&self, version: u64) -> Result<Vec<PathBuf>, GvtError> {
        if !self.version_exists(version) {
            return Err(GvtError::invalid_version(version));
        }
        Ok(list_files(&self.version_dir(version))?)
    }

    /// Copy every file of `version` into the working directory, overwriting
    /// files at the same paths. Files the version does not contain are left
    /// in place. Returns the restored paths.
    ///
    /// # Errors
    /// `InvalidVersion` if the version does not exist, `SystemFailure` on I/O errors.
    pub fn checkout(&self, version: u64) -> Result<Vec<PathBuf>, GvtError> {
        let files = self.tracked_files(version)?;
        let source = self.version_dir(version);
        for rel in &files {
            copy_file(&source.join(rel), &self.root().join(rel))?;
            debug!(path = %rel.display(), "restored");
        }
        info!(version, files = files.len(), "checked out version");
        Ok(files)
    }
}

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::{debug, warn};

use super::STAGING_PREFIX;

/// A version under construction. It lives inside the store so that
/// publishing is a same-filesystem rename; dropping it unpublished removes it.
pub(crate) struct Staging {
    dir: TempDir,
}

impl Staging {
    pub(crate) fn create(store: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(store)?;
        debug!(path = %dir.path().display(), "created staging directory");
        Ok(Self { dir })
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Move the staged tree to `target` in a single rename.
    pub(crate) fn publish(self, target: &Path) -> io::Result<()> {
        if target.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", target.display()),
            ));
        }
        fs::rename(self.dir.path(), target)?;
        // The TempDir now points at a path that no longer exists; its drop is a no-op.
        Ok(())
    }
}

/// Remove staging directories and HEAD temp files abandoned by an
/// interrupted run. Callers must hold the operations lock.
pub(crate) fn sweep_stale_staging(store: &Path) -> io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for entry in fs::read_dir(store)? {
        let entry = entry?;
        let is_staging = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(STAGING_PREFIX));
        if !is_staging {
            continue;
        }
        let path = entry.path();
        warn!(path = %path.display(), "removing abandoned staging entry");
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        removed.push(path);
    }
    Ok(removed)
}

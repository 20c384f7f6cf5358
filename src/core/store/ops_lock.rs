use std::{
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use fs2::FileExt;
use tracing::debug;

use super::LOCK_FILE;

/// Path to the lock that serializes version-creating operations.
#[must_use]
pub fn ops_lock_path(store: &Path) -> PathBuf {
    store.join(LOCK_FILE)
}

/// Guard that holds the store operations lock.
pub struct OpsLockGuard {
    file: File,
}

impl Drop for OpsLockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Acquire the exclusive lock guarding version creation in `store`.
///
/// This call blocks until the lock is available.
///
/// # Errors
/// Returns an error if the lock file cannot be opened or locked.
pub fn acquire_ops_lock(store: &Path) -> io::Result<OpsLockGuard> {
    let path = ops_lock_path(store);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&path)?;

    debug!(path = %path.display(), "waiting for store ops lock");
    file.lock_exclusive()?;

    Ok(OpsLockGuard { file })
}

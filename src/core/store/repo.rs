use std::{
    fs,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use tracing::{debug, warn};

use super::fsutil::write_message;
use super::{HEAD_FILE, INIT_MESSAGE, MESSAGE_FILE, STAGING_PREFIX, STORE_DIR};
use crate::error::GvtError;

/// Return the `.gvt` directory path under the given repository root.
#[must_use]
pub fn store_dir(repo_root: &Path) -> PathBuf {
    repo_root.join(STORE_DIR)
}

/// Find the nearest directory at or above `start` that holds a `.gvt` store.
#[must_use]
pub fn discover_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| store_dir(dir).is_dir())
        .map(Path::to_path_buf)
}

/// Handle on an initialized repository: the working directory root and the
/// store that lives inside it.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
    store: PathBuf,
}

impl Repository {
    /// Create the store under `root` with version 0.
    ///
    /// The store is assembled in a sibling directory and renamed to `.gvt`
    /// in one step, so a failed init leaves no partial store behind.
    ///
    /// # Errors
    /// `AlreadyInitialized` if a store is already present, `SystemFailure` on I/O errors.
    pub fn init(root: &Path) -> Result<Self, GvtError> {
        let store = store_dir(root);
        if store.exists() {
            return Err(GvtError::AlreadyInitialized);
        }

        let prefix = format!("{STORE_DIR}{STAGING_PREFIX}");
        let staging = tempfile::Builder::new().prefix(&prefix).tempdir_in(root)?;
        let version_zero = staging.path().join("0");
        fs::create_dir(&version_zero)?;
        write_message(&version_zero, INIT_MESSAGE)?;
        fs::write(staging.path().join(HEAD_FILE), "0\n")?;
        fs::rename(staging.path(), &store)?;

        debug!(root = %root.display(), "initialized store");
        Ok(Self {
            root: root.to_path_buf(),
            store,
        })
    }

    /// Open the store under `root`.
    ///
    /// # Errors
    /// `NotInitialized` if `root` has no store.
    pub fn open(root: &Path) -> Result<Self, GvtError> {
        let store = store_dir(root);
        if !store.is_dir() {
            return Err(GvtError::NotInitialized);
        }
        Ok(Self {
            root: root.to_path_buf(),
            store,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn store(&self) -> &Path {
        &self.store
    }

    #[must_use]
    pub fn version_dir(&self, version: u64) -> PathBuf {
        self.store.join(version.to_string())
    }

    #[must_use]
    pub fn version_exists(&self, version: u64) -> bool {
        self.version_dir(version).is_dir()
    }

    /// Whether `rel` is stored in `version`.
    #[must_use]
    pub fn is_tracked(&self, version: u64, rel: &Path) -> bool {
        !rel.as_os_str().is_empty() && self.version_dir(version).join(rel).is_file()
    }

    /// Number of the newest published version.
    ///
    /// Trusts HEAD, but steps over versions that were published after HEAD
    /// was last written. Falls back to a scan from 0 when HEAD is absent or
    /// points at a missing version.
    ///
    /// # Errors
    /// `NotInitialized` when the store holds no version at all.
    pub fn last_version(&self) -> Result<u64, GvtError> {
        let start = match self.read_head() {
            Some(head) if self.version_exists(head) => head,
            Some(head) => {
                warn!(head, "HEAD points at a missing version, rescanning store");
                self.scan_last_version().ok_or(GvtError::NotInitialized)?
            }
            None => self.scan_last_version().ok_or(GvtError::NotInitialized)?,
        };

        let mut last = start;
        while self.version_exists(last + 1) {
            last += 1;
        }
        if last != start {
            warn!(head = start, last, "HEAD was behind the published versions");
        }
        Ok(last)
    }

    /// Highest version in the contiguous run starting at 0.
    fn scan_last_version(&self) -> Option<u64> {
        let mut last = None;
        let mut next = 0;
        while self.version_exists(next) {
            last = Some(next);
            next += 1;
        }
        debug!(?last, "scanned store for versions");
        last
    }

    fn read_head(&self) -> Option<u64> {
        let path = self.store.join(HEAD_FILE);
        let contents = fs::read_to_string(&path).ok()?;
        match contents.trim().parse() {
            Ok(version) => Some(version),
            Err(_) => {
                warn!(path = %path.display(), "ignoring unreadable HEAD");
                None
            }
        }
    }

    /// Atomically replace HEAD with `version`. The temporary file carries the
    /// staging prefix so an interrupted write is swept like a staged version.
    pub(crate) fn write_head(&self, version: u64) -> io::Result<()> {
        let mut tmp = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(&self.store)?;
        writeln!(tmp, "{version}")?;
        tmp.persist(self.store.join(HEAD_FILE))
            .map_err(|e| e.error)?;
        Ok(())
    }

    /// Resolve a user-supplied path (relative to `cwd` unless absolute) into
    /// a path relative to the repository root.
    ///
    /// # Errors
    /// Fails with `InvalidInput` when the path leaves the repository or names
    /// a location reserved by the store.
    pub fn resolve(&self, cwd: &Path, path: &Path) -> io::Result<PathBuf> {
        let absolute = normalize(&cwd.join(path));
        let rel = absolute.strip_prefix(&self.root).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is outside the repository", path.display()),
            )
        })?;

        if rel.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "the repository root is not a file",
            ));
        }
        if rel == Path::new(MESSAGE_FILE) || rel.starts_with(STORE_DIR) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is reserved by the store", rel.display()),
            ));
        }
        Ok(rel.to_path_buf())
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem; the path
/// may name a file that no longer exists.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

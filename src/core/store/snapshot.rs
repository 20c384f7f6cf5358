use std::{io, path::Path};

use tracing::{debug, info, warn};

use super::fsutil::{copy_file, copy_tree, remove_tracked, write_message};
use super::ops_lock::acquire_ops_lock;
use super::publish::{Staging, sweep_stale_staging};
use super::repo::Repository;
use crate::error::{GvtError, Operation};

/// Result of a mutating store operation that may legitimately do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new version was published.
    Recorded { version: u64 },
    /// `add` of a file the last version already tracks.
    AlreadyTracked { version: u64 },
    /// `detach` or `commit` of a file the last version does not track.
    NotTracked { version: u64 },
}

impl Outcome {
    /// Number of the last version after the operation.
    #[must_use]
    pub const fn version(self) -> u64 {
        match self {
            Self::Recorded { version }
            | Self::AlreadyTracked { version }
            | Self::NotTracked { version } => version,
        }
    }
}

impl Repository {
    /// Start tracking `rel` (relative to the repository root).
    ///
    /// # Errors
    /// `FileNotFound` if the working file is missing, `OperationFailed` on I/O errors.
    pub fn add(&self, rel: &Path, message: Option<&str>) -> Result<Outcome, GvtError> {
        let op = Operation::Add;
        let source = self.root().join(rel);
        if !source.is_file() {
            return Err(GvtError::FileNotFound {
                operation: op,
                path: rel.to_path_buf(),
            });
        }

        let _lock = acquire_ops_lock(self.store())
            .map_err(|e| GvtError::operation_failed(op, rel, e))?;
        let last = self.last_version()?;
        if self.is_tracked(last, rel) {
            debug!(path = %rel.display(), version = last, "already tracked");
            return Ok(Outcome::AlreadyTracked { version: last });
        }

        let message = message.map_or_else(
            || format!("File added successfully. File: {}", rel.display()),
            str::to_owned,
        );
        let version = self
            .record(last, &message, |stage| copy_file(&source, &stage.join(rel)))
            .map_err(|e| GvtError::operation_failed(op, rel, e))?;
        info!(path = %rel.display(), version, "added file");
        Ok(Outcome::Recorded { version })
    }

    /// Stop tracking `rel`. The working file is left alone.
    ///
    /// # Errors
    /// `OperationFailed` on I/O errors.
    pub fn detach(&self, rel: &Path, message: Option<&str>) -> Result<Outcome, GvtError> {
        let op = Operation::Detach;
        let _lock = acquire_ops_lock(self.store())
            .map_err(|e| GvtError::operation_failed(op, rel, e))?;
        let last = self.last_version()?;
        if !self.is_tracked(last, rel) {
            debug!(path = %rel.display(), version = last, "not tracked");
            return Ok(Outcome::NotTracked { version: last });
        }

        let message = message.map_or_else(
            || format!("File detached successfully. File: {}", rel.display()),
            str::to_owned,
        );
        let version = self
            .record(last, &message, |stage| remove_tracked(stage, rel))
            .map_err(|e| GvtError::operation_failed(op, rel, e))?;
        info!(path = %rel.display(), version, "detached file");
        Ok(Outcome::Recorded { version })
    }

    /// Record the working content of an already tracked file.
    ///
    /// # Errors
    /// `FileNotFound` if the working file is missing, `OperationFailed` on I/O errors.
    pub fn commit(&self, rel: &Path, message: Option<&str>) -> Result<Outcome, GvtError> {
        let op = Operation::Commit;
        let source = self.root().join(rel);
        if !source.is_file() {
            return Err(GvtError::FileNotFound {
                operation: op,
                path: rel.to_path_buf(),
            });
        }

        let _lock = acquire_ops_lock(self.store())
            .map_err(|e| GvtError::operation_failed(op, rel, e))?;
        let last = self.last_version()?;
        if !self.is_tracked(last, rel) {
            debug!(path = %rel.display(), version = last, "not tracked");
            return Ok(Outcome::NotTracked { version: last });
        }

        let message = message.map_or_else(
            || format!("File committed successfully. File: {}", rel.display()),
            str::to_owned,
        );
        let version = self
            .record(last, &message, |stage| copy_file(&source, &stage.join(rel)))
            .map_err(|e| GvtError::operation_failed(op, rel, e))?;
        info!(path = %rel.display(), version, "committed file");
        Ok(Outcome::Recorded { version })
    }

    /// Publish `last + 1` as a copy of `last` with `delta` applied.
    ///
    /// Nothing becomes visible unless every step succeeds. The rename into
    /// the version directory is the commit point: a HEAD that cannot be
    /// updated afterwards only lags, and `last_version` steps over it.
    /// The caller must hold the operations lock.
    fn record<F>(&self, last: u64, message: &str, delta: F) -> io::Result<u64>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        sweep_stale_staging(self.store())?;

        let next = last + 1;
        let staging = Staging::create(self.store())?;
        copy_tree(&self.version_dir(last), staging.path())?;
        delta(staging.path())?;
        write_message(staging.path(), message)?;
        staging.publish(&self.version_dir(next))?;
        if let Err(err) = self.write_head(next) {
            warn!(version = next, error = %err, "published version but could not update HEAD");
        }

        debug!(version = next, "published version");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::core::store::{HEAD_FILE, MESSAGE_FILE, STAGING_PREFIX};

    fn repo() -> (tempfile::TempDir, Repository) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let repo = Repository::init(tmp.path()).expect("init");
        (tmp, repo)
    }

    fn message(repo: &Repository, version: u64) -> String {
        fs::read_to_string(repo.version_dir(version).join(MESSAGE_FILE)).expect("message")
    }

    #[test]
    fn add_copies_file_into_next_version() {
        let (tmp, repo) = repo();
        fs::write(tmp.path().join("a.txt"), "X").expect("write");

        let outcome = repo.add(Path::new("a.txt"), None).expect("add");

        assert_eq!(outcome, Outcome::Recorded { version: 1 });
        assert_eq!(
            fs::read_to_string(repo.version_dir(1).join("a.txt")).expect("read"),
            "X"
        );
        assert_eq!(message(&repo, 1), "File added successfully. File: a.txt");
        assert_eq!(repo.last_version().expect("last"), 1);
    }

    #[test]
    fn add_is_idempotent() {
        let (tmp, repo) = repo();
        fs::write(tmp.path().join("a.txt"), "X").expect("write");

        repo.add(Path::new("a.txt"), None).expect("add");
        let again = repo.add(Path::new("a.txt"), None).expect("add again");

        assert_eq!(again, Outcome::AlreadyTracked { version: 1 });
        assert!(!repo.version_exists(2));
    }

    #[test]
    fn add_missing_file_is_file_not_found() {
        let (_tmp, repo) = repo();
        let err = repo.add(Path::new("nope.txt"), None).expect_err("add");
        assert!(matches!(err, GvtError::FileNotFound { operation: Operation::Add, .. }));
        assert_eq!(err.exit_code(), 21);
        assert_eq!(repo.last_version().expect("last"), 0);
    }

    #[test]
    fn add_directory_is_file_not_found() {
        let (tmp, repo) = repo();
        fs::create_dir(tmp.path().join("dir")).expect("dir");
        let err = repo.add(Path::new("dir"), None).expect_err("add");
        assert!(matches!(err, GvtError::FileNotFound { .. }));
    }

    #[test]
    fn add_nested_file_keeps_previous_files() {
        let (tmp, repo) = repo();
        fs::write(tmp.path().join("a.txt"), "A").expect("write");
        fs::create_dir_all(tmp.path().join("src").join("bin")).expect("dirs");
        let nested = PathBuf::from("src").join("bin").join("main.rs");
        fs::write(tmp.path().join(&nested), "fn main() {}").expect("write");

        repo.add(Path::new("a.txt"), None).expect("add a");
        repo.add(&nested, Some("add main")).expect("add nested");

        assert!(repo.is_tracked(2, Path::new("a.txt")));
        assert!(repo.is_tracked(2, &nested));
        assert!(!repo.is_tracked(1, &nested));
        assert_eq!(message(&repo, 2), "add main");
    }

    #[test]
    fn commit_replaces_only_the_named_file() {
        let (tmp, repo) = repo();
        fs::write(tmp.path().join("a.txt"), "X").expect("write");
        fs::write(tmp.path().join("b.txt"), "B1").expect("write");
        repo.add(Path::new("a.txt"), None).expect("add a");
        repo.add(Path::new("b.txt"), None).expect("add b");

        fs::write(tmp.path().join("a.txt"), "Y").expect("write");
        fs::write(tmp.path().join("b.txt"), "B2").expect("write");
        let outcome = repo.commit(Path::new("a.txt"), Some("update a")).expect("commit");

        assert_eq!(outcome, Outcome::Recorded { version: 3 });
        let v3 = repo.version_dir(3);
        assert_eq!(fs::read_to_string(v3.join("a.txt")).expect("read"), "Y");
        assert_eq!(fs::read_to_string(v3.join("b.txt")).expect("read"), "B1");
        assert_eq!(
            fs::read_to_string(repo.version_dir(2).join("a.txt")).expect("read"),
            "X"
        );
        assert_eq!(message(&repo, 3), "update a");
    }

    #[test]
    fn commit_untracked_file_is_a_no_op() {
        let (tmp, repo) = repo();
        fs::write(tmp.path().join("a.txt"), "X").expect("write");

        let outcome = repo.commit(Path::new("a.txt"), None).expect("commit");

        assert_eq!(outcome, Outcome::NotTracked { version: 0 });
        assert!(!repo.version_exists(1));
    }

    #[test]
    fn commit_missing_working_file_is_file_not_found() {
        let (tmp, repo) = repo();
        fs::write(tmp.path().join("a.txt"), "X").expect("write");
        repo.add(Path::new("a.txt"), None).expect("add");
        fs::remove_file(tmp.path().join("a.txt")).expect("rm");

        let err = repo.commit(Path::new("a.txt"), None).expect_err("commit");
        assert_eq!(err.exit_code(), 51);
    }

    #[test]
    fn detach_drops_file_from_new_version_only() {
        let (tmp, repo) = repo();
        let nested = PathBuf::from("docs").join("a.txt");
        fs::create_dir_all(tmp.path().join("docs")).expect("dir");
        fs::write(tmp.path().join(&nested), "X").expect("write");
        repo.add(&nested, None).expect("add");

        let outcome = repo.detach(&nested, None).expect("detach");

        assert_eq!(outcome, Outcome::Recorded { version: 2 });
        assert!(!repo.is_tracked(2, &nested));
        assert!(!repo.version_dir(2).join("docs").exists());
        assert!(repo.is_tracked(1, &nested));
        assert!(tmp.path().join(&nested).is_file());
        assert_eq!(
            message(&repo, 2),
            format!("File detached successfully. File: {}", nested.display())
        );
    }

    #[test]
    fn detach_untracked_file_is_a_no_op() {
        let (_tmp, repo) = repo();
        let outcome = repo.detach(Path::new("ghost.txt"), None).expect("detach");
        assert_eq!(outcome, Outcome::NotTracked { version: 0 });
        assert!(!repo.version_exists(1));
    }

    #[test]
    fn version_counter_moves_once_per_change() {
        let (tmp, repo) = repo();
        fs::write(tmp.path().join("a.txt"), "1").expect("write");

        let steps: [(&str, u64); 7] = [
            ("add", 1),
            ("add", 1),
            ("commit", 2),
            ("detach", 3),
            ("detach", 3),
            ("commit", 3),
            ("add", 4),
        ];
        for (op, expected) in steps {
            let rel = Path::new("a.txt");
            let outcome = match op {
                "add" => repo.add(rel, None),
                "commit" => repo.commit(rel, None),
                _ => repo.detach(rel, None),
            }
            .expect(op);
            assert_eq!(outcome.version(), expected, "{op}");
            assert_eq!(repo.last_version().expect("last"), expected);
        }
    }

    #[test]
    fn failed_delta_publishes_nothing() {
        let (_tmp, repo) = repo();
        let err = repo
            .record(0, "boom", |_| Err(io::Error::other("injected")))
            .expect_err("record");
        assert_eq!(err.to_string(), "injected");

        assert!(!repo.version_exists(1));
        let leftovers: Vec<_> = fs::read_dir(repo.store())
            .expect("ls")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(STAGING_PREFIX))
            .collect();
        assert!(leftovers.is_empty());
        assert_eq!(repo.last_version().expect("last"), 0);
    }

    #[test]
    fn unwritable_head_does_not_fail_a_published_version() {
        let (tmp, repo) = repo();
        let head = repo.store().join(HEAD_FILE);
        fs::remove_file(&head).expect("rm HEAD");
        fs::create_dir(&head).expect("HEAD as dir");
        fs::write(tmp.path().join("a.txt"), "X").expect("write");

        let outcome = repo.add(Path::new("a.txt"), None).expect("add");

        assert_eq!(outcome, Outcome::Recorded { version: 1 });
        assert_eq!(repo.last_version().expect("last"), 1);
        let again = repo.add(Path::new("a.txt"), None).expect("add again");
        assert_eq!(again, Outcome::AlreadyTracked { version: 1 });
    }

    #[test]
    fn abandoned_staging_is_swept_on_next_change() {
        let (tmp, repo) = repo();
        let stale = repo.store().join(format!("{STAGING_PREFIX}crash"));
        fs::create_dir(&stale).expect("stale");
        fs::write(tmp.path().join("a.txt"), "X").expect("write");

        repo.add(Path::new("a.txt"), None).expect("add");

        assert!(!stale.exists());
        assert_eq!(repo.last_version().expect("last"), 1);
    }
}

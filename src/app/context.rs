use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::GvtConfig;
use crate::core::store::{self, Repository};
use crate::error::{GvtError, Operation};

#[derive(Debug, Clone)]
pub struct AppContext {
    /// Directory gvt was invoked from.
    pub cwd: PathBuf,
    /// Root of the enclosing repository, if one was found.
    pub repo_root: Option<PathBuf>,
    pub cfg: GvtConfig,
}

impl AppContext {
    pub const fn new(cwd: PathBuf, repo_root: Option<PathBuf>, cfg: GvtConfig) -> Self {
        Self {
            cwd,
            repo_root,
            cfg,
        }
    }

    /// Convenience constructor: discover the repository from the process
    /// working directory and load its config.
    ///
    /// # Errors
    /// Returns an error if the working directory or the config cannot be read.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::discover(cwd)
    }

    /// # Errors
    /// Returns an error if a config file exists but cannot be read.
    pub fn discover(cwd: PathBuf) -> Result<Self> {
        let repo_root = store::discover_root(&cwd);
        let cfg = match &repo_root {
            Some(root) => GvtConfig::load(&store::store_dir(root))?,
            None => GvtConfig::default(),
        };
        Ok(Self::new(cwd, repo_root, cfg))
    }

    /// Store directory of the enclosing repository.
    #[must_use]
    pub fn store(&self) -> Option<PathBuf> {
        self.repo_root.as_deref().map(store::store_dir)
    }

    /// Open the enclosing repository.
    ///
    /// # Errors
    /// `NotInitialized` when no repository encloses the working directory.
    pub fn repository(&self) -> Result<Repository, GvtError> {
        let root = self.repo_root.as_deref().ok_or(GvtError::NotInitialized)?;
        Repository::open(root)
    }

    /// Turn a path argument into a repository-relative path for `op`.
    ///
    /// # Errors
    /// `MissingArgument` if no path was given, `OperationFailed` if it lies
    /// outside the repository or on a reserved name.
    pub fn tracked_path(
        &self,
        repo: &Repository,
        op: Operation,
        path: Option<&str>,
    ) -> Result<PathBuf, GvtError> {
        let path = path.ok_or(GvtError::MissingArgument(op))?;
        repo.resolve(&self.cwd, Path::new(path))
            .map_err(|e| GvtError::operation_failed(op, path, e))
    }
}

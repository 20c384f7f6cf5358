use std::{io, path::PathBuf};

use thiserror::Error;

/// Exit code used for every failure that is not a [`GvtError`].
pub const SYSTEM_FAILURE_CODE: i32 = -3;

/// Exit code used when no subcommand was given.
pub const MISSING_COMMAND_CODE: i32 = 1;

/// Store operation an error originated from. Selects the wording and the
/// exit code of argument and file errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Detach,
    Commit,
    Checkout,
}

impl Operation {
    const fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Detach => "detach",
            Self::Commit => "commit",
            Self::Checkout => "checkout",
        }
    }

    const fn past_tense(self) -> &'static str {
        match self {
            Self::Add => "added",
            Self::Detach => "detached",
            Self::Commit => "committed",
            Self::Checkout => "checked out",
        }
    }

    const fn argument(self) -> &'static str {
        match self {
            Self::Checkout => "version",
            _ => "file",
        }
    }
}

/// Failure kinds reported by the snapshot store.
#[derive(Debug, Error)]
pub enum GvtError {
    #[error("Current directory is not initialized. Please use init command to initialize.")]
    NotInitialized,

    #[error("Current directory is already initialized.")]
    AlreadyInitialized,

    #[error("Please specify {} to {}.", .0.argument(), .0.verb())]
    MissingArgument(Operation),

    #[error("File not found. File: {}", .path.display())]
    FileNotFound { operation: Operation, path: PathBuf },

    #[error("Invalid version number: {0}")]
    InvalidVersion(String),

    #[error(
        "File cannot be {}, see ERR for details. File: {}",
        .operation.past_tense(),
        .path.display()
    )]
    OperationFailed {
        operation: Operation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Underlying system problem. See ERR for details.")]
    SystemFailure(#[source] io::Error),
}

impl GvtError {
    pub fn operation_failed(
        operation: Operation,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::OperationFailed {
            operation,
            path: path.into(),
            source,
        }
    }

    pub fn invalid_version(version: impl ToString) -> Self {
        Self::InvalidVersion(version.to_string())
    }

    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotInitialized => -2,
            Self::AlreadyInitialized => 10,
            Self::MissingArgument(op) => match op {
                Operation::Add => 20,
                Operation::Detach => 30,
                Operation::Commit => 50,
                Operation::Checkout => 60,
            },
            Self::FileNotFound { operation, .. } => match operation {
                Operation::Commit => 51,
                _ => 21,
            },
            Self::InvalidVersion(_) => 60,
            Self::OperationFailed { operation, .. } => match operation {
                Operation::Add => 22,
                Operation::Detach => 31,
                Operation::Commit => 52,
                Operation::Checkout => SYSTEM_FAILURE_CODE,
            },
            Self::SystemFailure(_) => SYSTEM_FAILURE_CODE,
        }
    }
}

impl From<io::Error> for GvtError {
    fn from(err: io::Error) -> Self {
        Self::SystemFailure(err)
    }
}

/// Exit code for an error bubbled up from a command handler.
#[must_use]
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<GvtError>()
        .map_or(SYSTEM_FAILURE_CODE, GvtError::exit_code)
}

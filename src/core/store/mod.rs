//! Versioned snapshot store.
//!
//! Every version is a complete copy of the tracked files under
//! `.gvt/<n>/`, next to a `message.txt` describing the change that produced
//! it. A new version is built in a staging directory and renamed into place,
//! then `HEAD` is updated to its number.

pub mod checkout;
pub(crate) mod fsutil;
pub mod history;
pub mod ops_lock;
pub(crate) mod publish;
pub mod repo;
pub mod snapshot;

pub use history::{HistoryEntry, VersionInfo};
pub use repo::{Repository, discover_root, store_dir};
pub use snapshot::Outcome;

/// Name of the hidden store directory at the repository root.
pub const STORE_DIR: &str = ".gvt";
/// Per-version message file.
pub const MESSAGE_FILE: &str = "message.txt";
/// Record of the last published version.
pub const HEAD_FILE: &str = "HEAD";
/// Optional git-config formatted settings file inside the store.
pub const CONFIG_FILE: &str = "config";
pub const LOCK_FILE: &str = "gvt.lock";
pub(crate) const STAGING_PREFIX: &str = ".staging-";
/// Message of version 0.
pub const INIT_MESSAGE: &str = "GVT initialized.";

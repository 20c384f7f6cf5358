use std::ffi::OsString;

use clap::{ArgAction, Parser, Subcommand};

/// gvt command-line interface
#[derive(Parser, Debug, Clone)]
#[command(name = "gvt", version, about = "Track files in numbered full-copy snapshots", long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv). `RUST_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create the .gvt store in the current directory
    Init,

    /// Start tracking a file
    Add {
        #[arg(value_name = "PATH")]
        path: Option<String>,

        /// Message recorded with the new version
        #[arg(short, long, value_name = "MESSAGE", allow_hyphen_values = true)]
        message: Option<String>,
    },

    /// Stop tracking a file (the working copy is kept)
    Detach {
        #[arg(value_name = "PATH")]
        path: Option<String>,

        /// Message recorded with the new version
        #[arg(short, long, value_name = "MESSAGE", allow_hyphen_values = true)]
        message: Option<String>,
    },

    /// Record the current content of a tracked file
    Commit {
        #[arg(value_name = "PATH")]
        path: Option<String>,

        /// Message recorded with the new version
        #[arg(short, long, value_name = "MESSAGE", allow_hyphen_values = true)]
        message: Option<String>,
    },

    /// Copy the files of a version back into the working directory
    Checkout {
        #[arg(value_name = "VERSION")]
        version: Option<String>,
    },

    /// List versions, newest first
    History {
        /// Show only the N most recent versions (also accepted as `-last N`)
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        last: Option<String>,
    },

    /// Show the full message of a version (defaults to the latest)
    Version {
        #[arg(value_name = "VERSION")]
        version: Option<String>,
    },

    /// List the files stored in a version (defaults to the latest)
    Files {
        #[arg(value_name = "VERSION")]
        version: Option<String>,
    },
}

impl Cli {
    /// Parse process arguments, accepting the single-dash `-last` spelling.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite `-last` into the `--last` form clap understands. Only arguments
/// of the `history` subcommand are touched; a message or path spelled
/// `-last` elsewhere passes through unchanged.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    // The subcommand is the first operand after the binary name; only
    // flag-style globals (`-v`) may precede it.
    let subcommand = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, arg)| !arg.to_string_lossy().starts_with('-'));
    if let Some((index, name)) = subcommand
        && name == "history"
    {
        for arg in &mut args[index + 1..] {
            if arg == "-last" {
                *arg = OsString::from("--last");
            }
        }
    }
    args
}

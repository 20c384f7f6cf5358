//! gvt: a minimal local version-control tool.
//!
//! Tracked files are snapshotted into numbered, immutable version
//! directories under `.gvt/`; see [`crate::core::store`] for the on-disk model.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;

use anyhow::Result;

use crate::{app::context::AppContext, cli::Cli};

/// Run one invocation: resolve the context, set up tracing and dispatch.
///
/// # Errors
/// Returns the command's error; [`error::exit_code_of`] maps it to an exit code.
pub fn run(cli: &Cli) -> Result<()> {
    let Some(command) = &cli.command else {
        anyhow::bail!(MissingCommand);
    };

    let ctx = AppContext::from_cwd()?;
    match ctx.store() {
        Some(store) if ctx.cfg.log_file => {
            logging::init::init_tracing_with_file(&store, cli.verbose)?;
        }
        _ => logging::init::init_tracing(cli.verbose)?,
    }

    let result = commands::dispatch(command, &ctx);
    if let Err(err) = &result {
        tracing::debug!(error = ?err, code = error::exit_code_of(err), "command failed");
    }
    result
}

/// Raised when gvt is invoked without a subcommand.
#[derive(Debug, thiserror::Error)]
#[error("Please specify command.")]
pub struct MissingCommand;

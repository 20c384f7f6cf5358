use anyhow::Result;

use crate::{app::context::AppContext, cli::Commands, error::GvtError};

pub mod add;
pub mod checkout;
pub mod commit;
pub mod detach;
pub mod files;
pub mod history;
pub mod init;
pub mod version;

/// Unified interface implemented by each subcommand handler.
pub trait Command {
    /// Execute the subcommand, printing its report on stdout.
    ///
    /// # Errors
    /// Returns an error if the command fails.
    fn run(&self, ctx: &AppContext) -> Result<()>;
}

/// Central dispatcher: routes a parsed subcommand to its handler.
///
/// # Errors
/// Returns an error if the invoked subcommand fails.
pub fn dispatch(command: &Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Init => init::InitCommand.run(ctx),
        Commands::Add { path, message } => {
            let cmd = add::AddCommand {
                path: path.as_deref(),
                message: message.as_deref(),
            };
            cmd.run(ctx)
        }
        Commands::Detach { path, message } => {
            let cmd = detach::DetachCommand {
                path: path.as_deref(),
                message: message.as_deref(),
            };
            cmd.run(ctx)
        }
        Commands::Commit { path, message } => {
            let cmd = commit::CommitCommand {
                path: path.as_deref(),
                message: message.as_deref(),
            };
            cmd.run(ctx)
        }
        Commands::Checkout { version } => {
            let cmd = checkout::CheckoutCommand {
                version: version.as_deref(),
            };
            cmd.run(ctx)
        }
        Commands::History { last } => {
            let cmd = history::HistoryCommand {
                last: last.as_deref(),
            };
            cmd.run(ctx)
        }
        Commands::Version { version } => {
            let cmd = version::VersionCommand {
                version: version.as_deref(),
            };
            cmd.run(ctx)
        }
        Commands::Files { version } => {
            let cmd = files::FilesCommand {
                version: version.as_deref(),
            };
            cmd.run(ctx)
        }
    }
}

/// Parse a version operand that must name a version.
fn parse_version(raw: &str) -> Result<u64, GvtError> {
    raw.trim()
        .parse()
        .map_err(|_| GvtError::invalid_version(raw))
}

/// Parse an optional version operand; anything unparsable means "latest".
fn parse_version_or_latest(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|r| r.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_version_parsing() {
        assert_eq!(parse_version(" 3 ").expect("parse"), 3);
        let err = parse_version("-1").expect_err("negative");
        assert_eq!(err.to_string(), "Invalid version number: -1");
    }

    #[test]
    fn lenient_version_parsing_defaults_to_latest() {
        assert_eq!(parse_version_or_latest(Some("2")), Some(2));
        assert_eq!(parse_version_or_latest(Some("two")), None);
        assert_eq!(parse_version_or_latest(None), None);
    }
}

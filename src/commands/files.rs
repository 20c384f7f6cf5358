use anyhow::Result;

use super::{Command, parse_version_or_latest};
use crate::app::context::AppContext;

pub struct FilesCommand<'a> {
    pub version: Option<&'a str>,
}

impl Command for FilesCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let repo = ctx.repository()?;
        let version = match parse_version_or_latest(self.version) {
            Some(v) => v,
            None => repo.last_version()?,
        };
        for path in repo.tracked_files(version)? {
            println!("{}", path.display());
        }
        Ok(())
    }
}

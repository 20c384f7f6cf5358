use anyhow::Result;

use super::{Command, parse_version_or_latest};
use crate::app::context::AppContext;

pub struct VersionCommand<'a> {
    pub version: Option<&'a str>,
}

impl Command for VersionCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let repo = ctx.repository()?;
        let info = repo.show_version(parse_version_or_latest(self.version))?;
        println!("Version: {}", info.version);
        println!("{}", info.message);
        Ok(())
    }
}

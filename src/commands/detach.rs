use anyhow::Result;

use super::Command;
use crate::app::context::AppContext;
use crate::core::store::Outcome;
use crate::error::Operation;

pub struct DetachCommand<'a> {
    pub path: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl Command for DetachCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let repo = ctx.repository()?;
        let rel = ctx.tracked_path(&repo, Operation::Detach, self.path)?;
        let shown = self.path.unwrap_or_default();

        match repo.detach(&rel, self.message)? {
            Outcome::Recorded { .. } => println!("File detached successfully. File: {shown}"),
            Outcome::AlreadyTracked { .. } | Outcome::NotTracked { .. } => {
                println!("File is not added to gvt. File: {shown}");
            }
        }
        Ok(())
    }
}

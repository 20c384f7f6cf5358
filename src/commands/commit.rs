use anyhow::Result;

use super::Command;
use crate::app::context::AppContext;
use crate::core::store::Outcome;
use crate::error::Operation;

pub struct CommitCommand<'a> {
    pub path: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl Command for CommitCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let repo = ctx.repository()?;
        let rel = ctx.tracked_path(&repo, Operation::Commit, self.path)?;
        let shown = self.path.unwrap_or_default();

        match repo.commit(&rel, self.message)? {
            Outcome::Recorded { .. } => println!("File committed successfully. File: {shown}"),
            Outcome::AlreadyTracked { .. } | Outcome::NotTracked { .. } => {
                println!("File is not added to gvt. File: {shown}");
            }
        }
        Ok(())
    }
}

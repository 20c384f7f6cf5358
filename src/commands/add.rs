use anyhow::Result;

use super::Command;
use crate::app::context::AppContext;
use crate::core::store::Outcome;
use crate::error::Operation;

pub struct AddCommand<'a> {
    pub path: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl Command for AddCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let repo = ctx.repository()?;
        let rel = ctx.tracked_path(&repo, Operation::Add, self.path)?;
        let shown = self.path.unwrap_or_default();

        match repo.add(&rel, self.message)? {
            Outcome::Recorded { .. } => println!("File added successfully. File: {shown}"),
            Outcome::AlreadyTracked { .. } | Outcome::NotTracked { .. } => {
                println!("File already added. File: {shown}");
            }
        }
        Ok(())
    }
}

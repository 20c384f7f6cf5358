use anyhow::Result;

use super::Command;
use crate::app::context::AppContext;
use crate::core::store::Repository;

pub struct InitCommand;

impl Command for InitCommand {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        Repository::init(&ctx.cwd)?;
        println!("Current directory initialized successfully.");
        Ok(())
    }
}

use anyhow::Result;

use super::{Command, parse_version};
use crate::app::context::AppContext;
use crate::error::{GvtError, Operation};

pub struct CheckoutCommand<'a> {
    pub version: Option<&'a str>,
}

impl Command for CheckoutCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let repo = ctx.repository()?;
        let raw = self
            .version
            .ok_or(GvtError::MissingArgument(Operation::Checkout))?;
        let version = parse_version(raw)?;

        repo.checkout(version)?;
        println!("Checkout successful for version: {version}");
        Ok(())
    }
}

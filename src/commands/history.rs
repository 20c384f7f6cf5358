use anyhow::Result;

use super::Command;
use crate::app::context::AppContext;

pub struct HistoryCommand<'a> {
    /// Raw `-last` operand; only a positive integer bounds the listing.
    pub last: Option<&'a str>,
}

impl HistoryCommand<'_> {
    fn limit(&self, ctx: &AppContext) -> Option<usize> {
        match self.last {
            Some(raw) => raw.trim().parse::<usize>().ok().filter(|n| *n > 0),
            None => ctx.cfg.default_history_limit(),
        }
    }
}

impl Command for HistoryCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let repo = ctx.repository()?;
        for entry in repo.history(self.limit(ctx))? {
            println!("{}: {}", entry.version, entry.summary);
        }
        Ok(())
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Config, ConfigLevel};

use crate::core::store::CONFIG_FILE;

/// gvt configuration values sourced from git-config formatted files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GvtConfig {
    /// Default number of entries shown by `history` (0 = all).
    pub history_limit: usize,
    /// Also write logs to `.gvt/gvt.log`.
    pub log_file: bool,
}

impl GvtConfig {
    /// Load configuration with precedence: store-local `.gvt/config` → global git config.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load(store: &Path) -> Result<Self> {
        let mut cfg = Config::new().context("failed to create config")?;

        if let Ok(global) = Config::find_global()
            && global.is_file()
        {
            cfg.add_file(&global, ConfigLevel::Global, false)
                .with_context(|| format!("failed to read {}", global.display()))?;
        }

        let local = store.join(CONFIG_FILE);
        if local.is_file() {
            cfg.add_file(&local, ConfigLevel::Local, false)
                .with_context(|| format!("failed to read {}", local.display()))?;
        }

        Ok(Self::from_config(&cfg))
    }

    fn from_config(cfg: &Config) -> Self {
        let mut out = Self::default();

        if let Ok(v) = cfg.get_i64("gvt.history-limit")
            && v >= 0
            && let Ok(vu) = usize::try_from(v)
        {
            out.history_limit = vu;
        }
        if let Ok(v) = cfg.get_bool("gvt.log-file") {
            out.log_file = v;
        }

        out
    }

    /// History bound to apply when the command line gives none.
    #[must_use]
    pub const fn default_history_limit(&self) -> Option<usize> {
        if self.history_limit == 0 {
            None
        } else {
            Some(self.history_limit)
        }
    }
}

use std::env;
use std::fmt;

use anyhow::Result;

use crate::telegram::telegram_config::TelegramConfig;

/// Where alerts go for this run.
#[derive(Debug, Clone)]
pub enum Delivery {
    DryRun,
    Telegram(TelegramConfig),
}

impl Delivery {
    pub fn from_env(dry_run: bool) -> Result<Self> {
        Self::resolve(dry_run, |key| env::var(key).ok())
    }

    /// Live delivery requires Telegram credentials; dry runs never read them.
    pub fn resolve(
        dry_run: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if dry_run {
            return Ok(Self::DryRun);
        }

        Ok(Self::Telegram(TelegramConfig::from_lookup(lookup)?))
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DryRun => write!(f, "dry-run"),
            Self::Telegram(_) => write!(f, "telegram"),
        }
    }
}

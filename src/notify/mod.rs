pub mod dry_run;

use anyhow::Result;
use async_trait::async_trait;

/// Delivers a plain-text alert to the configured destination.
#[async_trait]
pub trait Notifier {
    async fn send(&self, text: &str) -> Result<()>;
}

pub type DynamicNotifier = Box<dyn Notifier + Send + Sync>;

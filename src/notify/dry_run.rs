use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::notify::Notifier;

/// Logs alerts instead of delivering them.
#[derive(Debug, Default)]
pub struct DryRunNotifier;

#[async_trait]
impl Notifier for DryRunNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        info!("[DRY RUN] {text}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_always_succeeds() {
        assert!(DryRunNotifier.send("🔔 Tokyo market OPENING soon").await.is_ok());
    }
}

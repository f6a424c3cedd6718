use anyhow::Result;

use crate::{
    alerts::messages,
    notify::{DynamicNotifier, Notifier, dry_run::DryRunNotifier},
    scenario::delivery::Delivery,
    telegram::telegram_notifier::TelegramNotifier,
};

pub struct Scenario;

impl Scenario {
    pub fn notifier(delivery: &Delivery) -> Result<DynamicNotifier> {
        tracing::info!(delivery = %delivery, "creating notifier");

        let notifier: DynamicNotifier = match delivery {
            Delivery::DryRun => Box::new(DryRunNotifier),
            Delivery::Telegram(config) => Box::new(TelegramNotifier::new(config.clone())?),
        };

        Ok(notifier)
    }

    /// Sends a fixed message to confirm the destination is wired up. Delivery
    /// failures are logged, not returned.
    pub async fn send_test_alert(notifier: &(dyn Notifier + Send + Sync)) {
        match notifier.send(messages::TEST_ALERT).await {
            Ok(()) => tracing::info!("test alert sent"),
            Err(error) => tracing::error!("test alert failed: {error:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            if self.fail {
                anyhow::bail!("chat not found");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_alert_sends_fixed_text() {
        let notifier = RecordingNotifier::default();

        Scenario::send_test_alert(&notifier).await;

        assert_eq!(*notifier.sent.lock().unwrap(), [messages::TEST_ALERT]);
    }

    #[tokio::test]
    async fn failed_test_alert_is_swallowed() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };

        Scenario::send_test_alert(&notifier).await;

        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn dry_run_delivery_builds_logging_notifier() {
        let notifier = Scenario::notifier(&Delivery::DryRun).unwrap();

        assert!(notifier.send(messages::TEST_ALERT).await.is_ok());
    }
}

use anyhow::Result;
use async_trait::async_trait;

use crate::notify::Notifier;
use crate::telegram::{telegram_client::TelegramClient, telegram_config::TelegramConfig};

/// Sends alerts to a single Telegram chat.
#[derive(Debug)]
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = TelegramClient::new(&config)?;

        Ok(Self {
            client,
            chat_id: config.chat_id,
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let reply = self.client.send_message(&self.chat_id, text).await?;

        tracing::info!(
            chat_id = %self.chat_id,
            status = %reply.status,
            message_id = reply.result.message_id,
            "telegram message delivered"
        );

        Ok(())
    }
}

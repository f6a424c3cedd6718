use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::telegram::telegram_config::TelegramConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimal Telegram Bot API client.
#[derive(Clone, Debug)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: Url,
    bot_token: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base)
            .with_context(|| format!("invalid telegram api base {}", config.api_base))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("telegram api base {} cannot hold a path", config.api_base);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build telegram http client")?;

        Ok(Self {
            http,
            base_url,
            bot_token: config.bot_token.clone(),
        })
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Reply<SentMessage>> {
        let request = SendMessageRequest { chat_id, text };

        self.post("sendMessage", &request).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<Reply<T>> {
        let resp = self
            .http
            .post(self.method_url(method)?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("telegram {method} request failed"))?;

        let status = resp.status();
        let text = resp.text().await.context("read response body failed")?;

        tracing::debug!(%status, method, "telegram response");

        parse_response(status, &text)
    }

    fn method_url(&self, method: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("telegram api base cannot hold a path"))?
            .pop_if_empty()
            .push(&format!("bot{}", self.bot_token))
            .push(method);

        Ok(url)
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

/// A successful API result together with the HTTP status it arrived with.
#[derive(Debug)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub result: T,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

fn parse_response<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<Reply<T>> {
    let parsed: TelegramResponse<T> = match serde_json::from_str(text) {
        Ok(parsed) => parsed,
        Err(e) if status.is_success() => {
            anyhow::bail!("parse telegram response JSON failed: {e}; raw={text}");
        }
        Err(_) => anyhow::bail!("telegram http error {status}: {text}"),
    };

    if !status.is_success() || !parsed.ok {
        let description = parsed.description.as_deref().unwrap_or("no description");
        anyhow::bail!("telegram api error {status}: {description}");
    }

    let result = parsed
        .result
        .ok_or_else(|| anyhow!("telegram response missing `result`; raw={text}"))?;

    Ok(Reply { status, result })
}

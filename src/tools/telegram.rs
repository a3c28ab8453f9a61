use crate::agent::chunk::DEFAULT_MAX_LEN;
use crate::tools::{deserialize_option_u64, deserialize_option_usize};
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("Missing TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID environment variable")]
    MissingCredentials,
    #[error("TELEGRAM_MAX_LEN must be a positive integer")]
    InvalidMaxLen,
    #[error("Invalid TELEGRAM_BASE_URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Telegram API error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TelegramConfig {
    #[serde(rename = "telegram_bot_token")]
    pub bot_token: Option<String>,
    #[serde(rename = "telegram_chat_id")]
    pub chat_id: Option<String>,
    #[serde(
        rename = "telegram_max_len",
        default,
        deserialize_with = "deserialize_option_usize"
    )]
    pub max_len: Option<usize>,
    #[serde(
        rename = "telegram_timeout_secs",
        default,
        deserialize_with = "deserialize_option_u64"
    )]
    pub timeout_secs: Option<u64>,
    #[serde(rename = "telegram_base_url")]
    pub base_url: Option<String>,
}

impl TelegramConfig {
    /// Chunk budget for a single message.
    pub fn max_len(&self) -> usize {
        self.max_len.unwrap_or(DEFAULT_MAX_LEN)
    }
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    chat_id: String,
    endpoint: String,
    client: Client,
}

#[derive(Serialize, Debug)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let token = non_blank(config.bot_token.as_deref());
        let chat_id = non_blank(config.chat_id.as_deref());
        let (token, chat_id) = match (token, chat_id) {
            (Some(token), Some(chat_id)) => (token, chat_id),
            _ => return Err(TelegramError::MissingCredentials),
        };
        if config.max_len == Some(0) {
            return Err(TelegramError::InvalidMaxLen);
        }

        let base_url = non_blank(config.base_url.as_deref())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url =
            Url::parse(&base_url).map_err(|_| TelegramError::InvalidBaseUrl(base_url.clone()))?;
        let endpoint = format!(
            "{}/bot{}/sendMessage",
            base_url.as_str().trim_end_matches('/'),
            token
        );

        let timeout_secs = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build Telegram HTTP client")?;

        Ok(Self {
            chat_id,
            endpoint,
            client,
        })
    }

    /// Sends each chunk as its own message, in order. The first failure aborts
    /// the remaining sends; chunks already delivered stay delivered.
    pub async fn send_chunks(&self, chunks: &[String]) -> Result<(), TelegramError> {
        for (index, chunk) in chunks.iter().enumerate() {
            log::info!(
                "sending chunk {}/{} ({} chars)...",
                index + 1,
                chunks.len(),
                chunk.chars().count()
            );
            self.send_message(chunk).await?;
        }
        Ok(())
    }

    async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };
        // The endpoint embeds the bot token, so it is stripped from transport errors.
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| err.without_url())
            .context("Telegram sendMessage request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TelegramError::ApiStatus { status, body });
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

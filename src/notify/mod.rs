//! Outbound notifications.
//!
//! Thin Telegram forwarder used by the notify endpoint. Configured from the
//! environment; when unconfigured, the endpoint reports that instead of
//! failing silently.

use anyhow::{Context, Result};
use serde_json::json;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Sends messages to a Telegram chat through the bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Builds a notifier from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// Returns `None` when either variable is missing, leaving the notify
    /// endpoint disabled.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        Some(Self {
            client: reqwest::Client::new(),
            bot_token,
            chat_id,
        })
    }

    /// Sends `text` to the configured chat and returns Telegram's response.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response is not JSON.
    pub async fn send(&self, text: &str) -> Result<serde_json::Value> {
        let url = format!("{TELEGRAM_API_BASE}/bot{}/sendMessage", self.bot_token);
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("telegram request failed")?;

        response
            .json::<serde_json::Value>()
            .await
            .context("telegram response was not JSON")
    }
}

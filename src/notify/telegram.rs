//! Telegram Bot API notifier.
//!
//! Sends each message with `sendMessage`. Delivery is best-effort: HTTP
//! errors and non-2xx replies are logged and otherwise ignored.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::Notifier;
use crate::types::MonitorError;

const API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

pub struct TelegramNotifier {
    client: Client,
    token: SecretString,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(token: SecretString, chat_id: impl Into<String>) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MonitorError::Notification {
                channel: "telegram".into(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            token,
            chat_id: chat_id.into(),
            api_base: API_BASE.to_string(),
        })
    }

    /// Build from the env vars named in the config.
    pub fn from_env(token_env: &str, chat_id_env: &str) -> Result<Self, MonitorError> {
        let lookup = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| MonitorError::Notification {
                    channel: "telegram".into(),
                    message: format!("environment variable not set: {name}"),
                })
        };
        let token = lookup(token_env)?;
        let chat_id = lookup(chat_id_env)?;
        Self::new(SecretString::new(token), chat_id)
    }

    /// Point the notifier at a different API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token.expose_secret()
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text: message,
            disable_web_page_preview: true,
        };

        match self.client.post(self.endpoint()).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("Telegram notification sent");
            }
            Ok(resp) => {
                let status = resp.status();
                let text = resp.text().await.unwrap_or_default();
                warn!(%status, response = %text, "Telegram API rejected notification");
            }
            Err(e) => {
                // reqwest errors may embed the URL, which carries the token.
                warn!(error = %e.without_url(), "Failed to send Telegram notification");
            }
        }
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

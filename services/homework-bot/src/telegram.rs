//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Envelope of every Bot API answer
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram message sender bound to a single chat
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(
        config: &TelegramConfig,
        bot_token: &str,
        chat_id: &str,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let send_message_url = format!(
            "{}/bot{}/sendMessage",
            config.api_url.trim_end_matches('/'),
            bot_token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_message_url,
            chat_id: chat_id.to_string(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, text: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", text)];

        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let response = self
            .http
            .post_form(&self.send_message_url, &params)
            .await
            .map_err(|e| crate::HomeworkBotError::Notifier(e.to_string()))?;

        let parsed = serde_json::from_str::<TelegramResponse>(&response.body).ok();
        if response.status != 200 || !parsed.as_ref().is_some_and(|r| r.ok) {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or(response.body);
            return Err(crate::HomeworkBotError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, description
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}

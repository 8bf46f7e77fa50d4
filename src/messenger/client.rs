use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{ApiResponse, MessageSender, SendMessageRequest};
use crate::error::SendError;
use crate::update::ChatId;

/// Bot API client posting to `/bot<TOKEN>/sendMessage`
#[derive(Clone)]
pub struct TelegramSender {
    client: Client,
    base_url: String,
}

impl TelegramSender {
    pub fn new(client: Client, api_base: &str, bot_token: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", api_base.trim_end_matches('/'), bot_token),
        }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), SendError> {
        let url = format!("{}/sendMessage", self.base_url);
        let body = SendMessageRequest::html(chat_id, text);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Status { status, body });
        }

        // Telegram can answer 200 and still refuse the message
        let reply: ApiResponse = response.json().await?;
        if !reply.ok {
            return Err(SendError::Api {
                description: reply.description.unwrap_or_default(),
            });
        }

        debug!("Sent message to chat {}", chat_id);
        Ok(())
    }
}

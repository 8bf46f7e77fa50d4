use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SendError;
use crate::update::ChatId;

/// JSON body of a Bot API `sendMessage` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub chat_id: ChatId,
    pub text: String,
    pub parse_mode: String,
}

impl SendMessageRequest {
    /// Text is passed through untouched; callers produce valid HTML
    pub fn html(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: "HTML".to_string(),
        }
    }
}

/// Envelope every Bot API method answers with
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Delivers replies to a chat
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), SendError>;
}

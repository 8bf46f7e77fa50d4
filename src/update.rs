use std::fmt;

use serde::{Deserialize, Serialize};

/// Telegram chat id, the key toggle state is scoped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subset of a Bot API `Update` the bot reads. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: Option<i64>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

/// A text message normalized out of an update, valid for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub update_id: Option<i64>,
    pub message_id: Option<i64>,
}

impl InboundMessage {
    /// `None` when the update carries no message or the message has no text
    pub fn from_update(update: Update) -> Option<Self> {
        let message = update.message?;
        let text = message.text.filter(|t| !t.is_empty())?;
        Some(Self {
            chat_id: message.chat.id,
            text,
            update_id: update.update_id,
            message_id: message.message_id,
        })
    }

    /// Parse a raw webhook body. Malformed JSON is treated like an update without text.
    pub fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Update>(body) {
            Ok(update) => Self::from_update(update),
            Err(e) => {
                tracing::debug!("Ignoring unparseable update: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_message() {
        let body = br#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "is_bot": false, "first_name": "A"},
                "chat": {"id": -100123, "type": "group"},
                "date": 1700000000,
                "text": "hello"
            }
        }"#;
        let msg = InboundMessage::parse(body).unwrap();
        assert_eq!(msg.chat_id, ChatId(-100123));
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.update_id, Some(10));
        assert_eq!(msg.message_id, Some(5));
    }

    #[test]
    fn update_without_message_is_ignored() {
        let body = br#"{"update_id": 1, "edited_message": {"chat": {"id": 1}, "text": "x"}}"#;
        assert!(InboundMessage::parse(body).is_none());
    }

    #[test]
    fn message_without_text_is_ignored() {
        let body = br#"{"message": {"chat": {"id": 1}, "photo": []}}"#;
        assert!(InboundMessage::parse(body).is_none());

        let empty = br#"{"message": {"chat": {"id": 1}, "text": ""}}"#;
        assert!(InboundMessage::parse(empty).is_none());
    }

    #[test]
    fn malformed_body_is_ignored() {
        assert!(InboundMessage::parse(b"not json").is_none());
        assert!(InboundMessage::parse(b"").is_none());
        assert!(InboundMessage::parse(br#"{"message": {"text": "no chat"}}"#).is_none());
    }
}

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::commands::Command;
use crate::config::TranslateConfig;
use crate::language::{Language, LanguageClassifier};
use crate::messenger::MessageSender;
use crate::toggle::ToggleStore;
use crate::translate::{TranslateRequest, Translator};
use crate::update::{ChatId, InboundMessage};

/// Reply sent when the translation API gives no usable result
pub const TRANSLATION_FAILED_TEXT: &str = "❌ 翻译失败，请稍后重试";

/// Which branch handling an update ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No message, no text, or only whitespace
    Ignored,
    Command(Command),
    /// `/on` or `/off` could not be persisted; no confirmation was sent
    CommandFailed(Command),
    /// Translation is off for this chat (or its state could not be read)
    Disabled,
    Translated,
    TranslationFailed,
}

/// Request-scoped message handling: commands, toggle check, translation, reply.
///
/// Holds no per-request state; everything mutable lives behind `ToggleStore`.
pub struct Pipeline {
    store: Arc<dyn ToggleStore>,
    translator: Arc<dyn Translator>,
    sender: Arc<dyn MessageSender>,
    classifier: LanguageClassifier,
    languages: TranslateConfig,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ToggleStore>,
        translator: Arc<dyn Translator>,
        sender: Arc<dyn MessageSender>,
        classifier: LanguageClassifier,
        languages: TranslateConfig,
    ) -> Self {
        Self {
            store,
            translator,
            sender,
            classifier,
            languages,
        }
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Handle a raw webhook body
    pub async fn handle_body(&self, body: &[u8]) -> Outcome {
        match InboundMessage::parse(body) {
            Some(message) => self.handle(message).await,
            None => Outcome::Ignored,
        }
    }

    pub async fn handle(&self, message: InboundMessage) -> Outcome {
        let chat_id = message.chat_id;
        let text = message.text.trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }

        if let Some(command) = Command::parse(text) {
            return self.run_command(chat_id, command).await;
        }

        let enabled = match self.store.get(chat_id).await {
            Ok(enabled) => enabled,
            Err(e) => {
                warn!("Failed to read toggle for chat {}: {}", chat_id, e);
                false
            }
        };
        if !enabled {
            debug!("Translation disabled for chat {}", chat_id);
            return Outcome::Disabled;
        }

        let source = self.classifier.classify(text);
        let request = TranslateRequest {
            text: text.to_string(),
            source_lang: self.code(source).to_string(),
            target_lang: self.code(source.opposite()).to_string(),
        };

        match self.translator.translate(&request).await {
            Some(translated) => {
                self.reply(chat_id, &translated).await;
                Outcome::Translated
            }
            None => {
                self.reply(chat_id, TRANSLATION_FAILED_TEXT).await;
                Outcome::TranslationFailed
            }
        }
    }

    async fn run_command(&self, chat_id: ChatId, command: Command) -> Outcome {
        info!("Command {:?} in chat {}", command, chat_id);

        if let Some(enabled) = command.toggle_value() {
            if let Err(e) = self.store.set(chat_id, enabled).await {
                error!("Failed to store toggle for chat {}: {}", chat_id, e);
                return Outcome::CommandFailed(command);
            }
        }

        self.reply(chat_id, command.reply()).await;
        Outcome::Command(command)
    }

    /// Best-effort send; failures are logged only
    async fn reply(&self, chat_id: ChatId, text: &str) {
        if let Err(e) = self.sender.send(chat_id, text).await {
            error!("Failed to send reply to chat {}: {}", chat_id, e);
        }
    }

    fn code(&self, language: Language) -> &str {
        match language {
            Language::Chinese => self.languages.chinese_code.as_str(),
            Language::English => self.languages.english_code.as_str(),
        }
    }
}

use async_trait::async_trait;

use crate::error::StoreError;
use crate::update::ChatId;

/// Per-chat "auto-translate enabled" flag.
///
/// Implementations must return `false` for chats that were never set. The
/// pipeline relies on nothing else, so backends are interchangeable.
#[async_trait]
pub trait ToggleStore: Send + Sync {
    async fn get(&self, chat_id: ChatId) -> Result<bool, StoreError>;

    async fn set(&self, chat_id: ChatId, enabled: bool) -> Result<(), StoreError>;

    /// Short backend name for logs and the health endpoint
    fn backend(&self) -> &'static str;
}

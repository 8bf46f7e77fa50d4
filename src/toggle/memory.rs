use async_trait::async_trait;
use dashmap::DashMap;

use super::interface::ToggleStore;
use crate::error::StoreError;
use crate::update::ChatId;

/// Process-local toggle state. Lost on restart; concurrent writes to one chat are last-write-wins.
#[derive(Debug, Default)]
pub struct MemoryToggleStore {
    enabled: DashMap<ChatId, bool>,
}

impl MemoryToggleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ToggleStore for MemoryToggleStore {
    async fn get(&self, chat_id: ChatId) -> Result<bool, StoreError> {
        Ok(self.enabled.get(&chat_id).map(|e| *e.value()).unwrap_or(false))
    }

    async fn set(&self, chat_id: ChatId, enabled: bool) -> Result<(), StoreError> {
        self.enabled.insert(chat_id, enabled);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toggle::tests::assert_toggle_contract;

    #[tokio::test]
    async fn satisfies_toggle_contract() {
        assert_toggle_contract(&MemoryToggleStore::new(), ChatId(42)).await;
    }

    #[tokio::test]
    async fn unknown_chat_defaults_to_disabled() {
        let store = MemoryToggleStore::new();
        assert!(!store.get(ChatId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn reads_back_latest_write() {
        let store = MemoryToggleStore::new();

        store.set(ChatId(7), true).await.unwrap();
        assert!(store.get(ChatId(7)).await.unwrap());

        store.set(ChatId(7), false).await.unwrap();
        assert!(!store.get(ChatId(7)).await.unwrap());
    }

    #[tokio::test]
    async fn chats_are_independent() {
        let store = MemoryToggleStore::new();
        store.set(ChatId(1), true).await.unwrap();

        assert!(store.get(ChatId(1)).await.unwrap());
        assert!(!store.get(ChatId(2)).await.unwrap());
    }
}

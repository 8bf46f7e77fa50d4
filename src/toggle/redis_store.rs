use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

use super::interface::ToggleStore;
use crate::error::StoreError;
use crate::update::ChatId;

/// Durable toggle state: one Redis string per chat, `"<prefix>:<chat_id>"` → `"true"`/`"false"`
pub struct RedisToggleStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisToggleStore {
    /// Connects once; the manager is cloned per call and reconnects on its own
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Connected to Redis toggle store");
        Ok(Self {
            conn,
            key_prefix: key_prefix.into(),
        })
    }

    fn key(&self, chat_id: ChatId) -> String {
        toggle_key(&self.key_prefix, chat_id)
    }
}

fn toggle_key(prefix: &str, chat_id: ChatId) -> String {
    format!("{}:{}", prefix, chat_id)
}

fn encode(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

fn decode(value: Option<&str>) -> bool {
    value == Some("true")
}

#[async_trait]
impl ToggleStore for RedisToggleStore {
    async fn get(&self, chat_id: ChatId) -> Result<bool, StoreError> {
        let key = self.key(chat_id);
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(&key).await?;
        debug!("Toggle read {} = {:?}", key, value);
        Ok(decode(value.as_deref()))
    }

    async fn set(&self, chat_id: ChatId, enabled: bool) -> Result<(), StoreError> {
        let key = self.key(chat_id);
        let mut conn = self.conn.clone();
        let _: () = conn.set(&key, encode(enabled)).await?;
        debug!("Toggle write {} = {}", key, encode(enabled));
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

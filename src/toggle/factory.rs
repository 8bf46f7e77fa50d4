use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use super::{MemoryToggleStore, RedisToggleStore, ToggleStore};
use crate::config::{ToggleBackend, ToggleStoreConfig};

/// Builds the toggle store selected by configuration
pub struct ToggleStoreFactory;

impl ToggleStoreFactory {
    pub async fn create_store(config: &ToggleStoreConfig) -> Result<Arc<dyn ToggleStore>> {
        info!("Initializing toggle store: {}", config.backend.as_str());

        match config.backend {
            ToggleBackend::Memory => Ok(Arc::new(MemoryToggleStore::new())),
            ToggleBackend::Redis => {
                let url = config
                    .redis_url
                    .as_deref()
                    .context("toggle_store.redis_url is required for the redis backend")?;
                let store = RedisToggleStore::connect(url, config.key_prefix.clone())
                    .await
                    .context("could not connect to toggle_store.redis_url")?;
                Ok(Arc::new(store))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redis_config(url: Option<&str>) -> ToggleStoreConfig {
        ToggleStoreConfig {
            backend: ToggleBackend::Redis,
            redis_url: url.map(str::to_string),
            key_prefix: "translate".to_string(),
        }
    }

    #[tokio::test]
    async fn builds_memory_backend_by_default() {
        let memory = ToggleStoreFactory::create_store(&ToggleStoreConfig::default())
            .await
            .unwrap();
        assert_eq!(memory.backend(), "memory");
    }

    #[tokio::test]
    async fn redis_without_url_fails() {
        assert!(ToggleStoreFactory::create_store(&redis_config(None)).await.is_err());
    }

    #[tokio::test]
    async fn redis_with_invalid_url_fails() {
        assert!(ToggleStoreFactory::create_store(&redis_config(Some("not a url")))
            .await
            .is_err());
    }

    #[tokio::test]
    #[ignore = "needs a Redis server at REDIS_URL"]
    async fn builds_redis_backend() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
        let redis = ToggleStoreFactory::create_store(&redis_config(Some(&url)))
            .await
            .unwrap();
        assert_eq!(redis.backend(), "redis");
    }
}

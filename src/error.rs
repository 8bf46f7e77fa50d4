use thiserror::Error;

/// Failure reading or writing per-chat toggle state
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Failure delivering a reply through the Bot API
#[derive(Debug, Error)]
pub enum SendError {
    #[error("sendMessage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sendMessage returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("sendMessage rejected: {description}")]
    Api { description: String },
}

/// Failure calling the translation API. Never surfaced past the translation client.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translate request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translate API returned {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected translate response shape")]
    Shape,
    #[error("translate API returned an empty result")]
    Empty,
}

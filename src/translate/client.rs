use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use super::interface::{TranslateRequest, Translator};
use crate::error::TranslateError;

/// Client for the public `translate_a/single` endpoint (`client=gtx`)
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
}

impl GoogleTranslateClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let params = [
            ("client", "gtx"),
            ("sl", request.source_lang.as_str()),
            ("tl", request.target_lang.as_str()),
            ("dt", "t"),
            ("q", request.text.as_str()),
        ];

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status));
        }

        let body: Value = response.json().await?;
        extract_translation(&body)
    }
}

/// Join the translated segments of a `[[["seg", "orig", ...], ...], ...]` response
fn extract_translation(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or(TranslateError::Shape)?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::Empty);
    }
    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, request: &TranslateRequest) -> Option<String> {
        debug!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            request.source_lang,
            request.target_lang
        );

        match self.fetch(request).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!("Translation failed: {}", e);
                None
            }
        }
    }
}

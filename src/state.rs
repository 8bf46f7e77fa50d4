use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;

use crate::config::Config;
use crate::language::LanguageClassifier;
use crate::messenger::TelegramSender;
use crate::pipeline::Pipeline;
use crate::toggle::ToggleStoreFactory;
use crate::translate::GoogleTranslateClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let store = ToggleStoreFactory::create_store(&config.toggle_store).await?;
        let translator = Arc::new(GoogleTranslateClient::new(
            http.clone(),
            config.translate_config.base_url.clone(),
        ));
        let sender = Arc::new(TelegramSender::new(
            http,
            &config.bot_config.api_base,
            &config.bot_config.bot_token,
        ));

        let pipeline = Pipeline::new(
            store,
            translator,
            sender,
            LanguageClassifier::new(&config.classifier),
            config.translate_config.clone(),
        );

        Ok(Self::with_pipeline(config, pipeline))
    }

    pub fn with_pipeline(config: Config, pipeline: Pipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}

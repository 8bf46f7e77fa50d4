use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::language::{default_presence_ranges, default_script_ranges, CodepointRange};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    pub bot_config: BotConfig,
    #[serde(default)]
    pub translate_config: TranslateConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub toggle_store: ToggleStoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub bot_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Expected value of the `X-Telegram-Bot-Api-Secret-Token` header
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    #[serde(default = "default_translate_base_url")]
    pub base_url: String,
    #[serde(default = "default_chinese_code")]
    pub chinese_code: String,
    #[serde(default = "default_english_code")]
    pub english_code: String,
}

fn default_translate_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_chinese_code() -> String {
    "zh-CN".to_string()
}

fn default_english_code() -> String {
    "en".to_string()
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            base_url: default_translate_base_url(),
            chinese_code: default_chinese_code(),
            english_code: default_english_code(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_script_ranges")]
    pub script_ranges: Vec<CodepointRange>,
    #[serde(default = "default_presence_ranges")]
    pub presence_ranges: Vec<CodepointRange>,
}

fn default_threshold() -> f64 {
    0.3
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            script_ranges: default_script_ranges(),
            presence_ranges: default_presence_ranges(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleBackend {
    #[default]
    Memory,
    Redis,
}

impl ToggleBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleBackend::Memory => "memory",
            ToggleBackend::Redis => "redis",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleStoreConfig {
    #[serde(default)]
    pub backend: ToggleBackend,
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_key_prefix() -> String {
    "translate".to_string()
}

impl Default for ToggleStoreConfig {
    fn default() -> Self {
        Self {
            backend: ToggleBackend::default(),
            redis_url: None,
            key_prefix: default_key_prefix(),
        }
    }
}

impl Config {
    /// Load a JSON (`.json`, `.jsonld`) or YAML config file, expanding `${VAR}` references
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            bail!("Configuration file not found: {}", path);
        }
        let content = fs::read_to_string(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let content = substitute_env(content, |name| std::env::var(name).ok());

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Build a config from environment variables alone, for deployments without a file
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let Some(bot_token) = lookup("BOT_TOKEN") else {
            bail!("BOT_TOKEN environment variable is not set");
        };

        let mut config = Config {
            system_config: SystemConfig::default(),
            bot_config: BotConfig {
                bot_token,
                api_base: lookup("TELEGRAM_API_BASE").unwrap_or_else(default_api_base),
                webhook_secret: lookup("WEBHOOK_SECRET"),
            },
            translate_config: TranslateConfig::default(),
            classifier: ClassifierConfig::default(),
            toggle_store: ToggleStoreConfig::default(),
        };

        if let Some(host) = lookup("HOST") {
            config.system_config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.system_config.port = port.parse()?;
        }
        if let Some(threshold) = lookup("TRANSLATE_THRESHOLD") {
            config.classifier.threshold = threshold.parse()?;
        }
        if let Some(redis_url) = lookup("REDIS_URL") {
            config.toggle_store.backend = ToggleBackend::Redis;
            config.toggle_store.redis_url = Some(redis_url);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let token = self.bot_config.bot_token.trim();
        if token.is_empty() || token.starts_with("${") {
            bail!("bot_config.bot_token is not set");
        }

        let threshold = self.classifier.threshold;
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            bail!("classifier.threshold must be in [0, 1), got {}", threshold);
        }
        if self.classifier.script_ranges.is_empty() {
            bail!("classifier.script_ranges must not be empty");
        }

        if self.toggle_store.backend == ToggleBackend::Redis
            && self.toggle_store.redis_url.as_deref().map_or(true, str::is_empty)
        {
            bail!("toggle_store.redis_url is required for the redis backend");
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables are left as-is
fn substitute_env(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    static PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
        Regex::new(r"\$\{(\w+)\}").expect("env substitution pattern is valid")
    });

    PATTERN
        .replace_all(content, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

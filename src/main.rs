mod commands;
mod config;
mod error;
mod language;
mod messenger;
mod pipeline;
mod routes;
mod state;
mod toggle;
mod translate;
mod update;

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tg_translate_bot=debug,tower_http=debug")),
        )
        .init();

    let config = load_config()?;

    let app_state = AppState::new(config.clone()).await?;
    info!(
        "Toggle store: {}, webhook secret: {}",
        app_state.pipeline.store_backend(),
        if config.bot_config.webhook_secret.is_some() { "set" } else { "unset" }
    );

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let ip: std::net::IpAddr = config.system_config.host.parse()?;
    let addr = SocketAddr::from((ip, config.system_config.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Try the config file locations in order, then fall back to plain environment variables
fn load_config() -> Result<Config> {
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.jsonld".to_string()),
        Some("conf.json".to_string()),
        Some("conf.yaml".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    for path in &config_paths {
        if !std::path::Path::new(path).exists() {
            tracing::debug!("No config file at {}", path);
            continue;
        }
        // A file that exists but does not parse is a startup error, not a fallback
        let cfg = Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path))?;
        info!("Loaded configuration from: {}", path);
        return Ok(cfg);
    }

    info!("No config file found (tried {:?}), reading environment", config_paths);
    Config::from_env()
}

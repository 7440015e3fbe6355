//! vpn-cabinet — Telegram-бот, открывающий VPN-кабинет как мини-приложение.

use std::path::PathBuf;
use std::sync::Arc;
use teloxide::dispatching::Dispatcher;
use teloxide::prelude::*;
use vpn_cabinet::api::ApiClient;
use vpn_cabinet::bot;
use vpn_cabinet::config::{Config, DEFAULT_CONFIG_PATH};
use vpn_cabinet::transport::ReqwestTransport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    tracing::info!("Starting vpn-cabinet with config {}", config_path.display());

    let config = Arc::new(Config::load(&config_path)?);
    let token = config.bot_token()?;
    tracing::info!(
        admin_count = config.admin_ids.len(),
        backend_url = %config.backend_url,
        webapp_url = %config.webapp_url,
        request_timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let transport = ReqwestTransport::with_timeout(config.request_timeout())?;
    let api = Arc::new(ApiClient::new(config.backend_url.clone(), Arc::new(transport)));

    let state = bot::handlers::BotState {
        config,
        api,
        bot_token: Arc::from(token.as_str()),
    };
    let bot = Bot::new(token);
    bot::handlers::register_commands(&bot).await;
    tracing::info!("Dispatcher initialized, bot is ready");

    Dispatcher::builder(bot, bot::handlers::schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

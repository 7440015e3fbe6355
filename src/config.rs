//! Конфигурация бота-запускателя (TOML).

use reqwest::Url;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/vpn-cabinet.toml";
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
/// Telegram кэширует WebApp по URL; параметр версии сбрасывает кэш.
pub const ADMIN_CACHE_BUST_QUERY: &str = "v=4";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Если не задан, берётся из переменной окружения `BOT_TOKEN`.
    #[serde(default)]
    pub bot_token: Option<String>,
    pub backend_url: String,
    pub webapp_url: String,
    pub admin_webapp_url: String,
    #[serde(default)]
    pub admin_ids: Vec<i64>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Не удалось прочитать конфиг {}: {}", path.display(), e)
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, anyhow::Error> {
        let config: Config =
            toml::from_str(text).map_err(|e| anyhow::anyhow!("Некорректный конфиг: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        for (field, value) in [
            ("backend_url", &self.backend_url),
            ("webapp_url", &self.webapp_url),
            ("admin_webapp_url", &self.admin_webapp_url),
        ] {
            Url::parse(value)
                .map_err(|e| anyhow::anyhow!("Некорректный {} ({}): {}", field, value, e))?;
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs должен быть больше нуля");
        }
        Ok(())
    }

    pub fn bot_token(&self) -> Result<String, anyhow::Error> {
        let token = match self.bot_token.as_deref() {
            Some(token) => token.to_string(),
            None => std::env::var(BOT_TOKEN_ENV).unwrap_or_default(),
        };
        let token = token.trim().to_string();
        if token.is_empty() {
            anyhow::bail!("bot_token не задан ни в конфиге, ни в {}", BOT_TOKEN_ENV);
        }
        Ok(token)
    }

    pub fn is_admin(&self, tg_user_id: i64) -> bool {
        self.admin_ids.contains(&tg_user_id)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn webapp_url(&self) -> Result<Url, anyhow::Error> {
        Ok(Url::parse(&self.webapp_url)?)
    }

    pub fn admin_webapp_url(&self) -> Result<Url, anyhow::Error> {
        Ok(Url::parse(&with_cache_bust(&self.admin_webapp_url))?)
    }
}

/// Добавляет `?v=4`, если в URL ещё нет query.
pub fn with_cache_bust(url: &str) -> String {
    if url.contains('?') {
        url.to_string()
    } else {
        format!("{}?{}", url, ADMIN_CACHE_BUST_QUERY)
    }
}

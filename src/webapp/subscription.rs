//! Личный кабинет пользователя: статус подписки, ссылка, инструкции.

use super::host::{Host, Popup};
use super::instructions::{Platform, instructions_for};
use super::render::PLACEHOLDER;
use super::session::{self, BootstrapError, Session};
use crate::api::ApiClient;
use crate::model::{SubscriptionInfo, SubscriptionStatus};

pub const DEFAULT_DOWNLOAD_URL: &str = "https://vpn.example.com/app";
pub const NO_SUBSCRIPTION_URL_TEXT: &str = "Нет активной подписки";
pub const COPY_FAILED_TEXT: &str = "Не удалось скопировать ссылку";

/// Всё, что показывается на карточке подписки и во вкладках.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionView {
    pub subscription_id: String,
    pub days: String,
    pub url: String,
    pub copy_enabled: bool,
    pub status: SubscriptionStatus,
    pub error: Option<String>,
    pub active_tab: String,
    pub tab_content: &'static str,
}

impl Default for SubscriptionView {
    fn default() -> Self {
        Self {
            subscription_id: PLACEHOLDER.to_string(),
            days: PLACEHOLDER.to_string(),
            url: NO_SUBSCRIPTION_URL_TEXT.to_string(),
            copy_enabled: false,
            status: SubscriptionStatus::Inactive,
            error: None,
            active_tab: Platform::DEFAULT.key().to_string(),
            tab_content: Platform::DEFAULT.instructions(),
        }
    }
}

impl SubscriptionView {
    pub fn apply(&mut self, info: &SubscriptionInfo) {
        self.subscription_id = info
            .subscription_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        self.days = info
            .expires_in_days
            .map(|days| format!("{} дн", days))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        self.url = info
            .sub_url
            .clone()
            .unwrap_or_else(|| NO_SUBSCRIPTION_URL_TEXT.to_string());
        self.copy_enabled = info.sub_url.is_some();
        self.status = info.status;
    }
}

pub struct SubscriptionViewer {
    api: ApiClient,
    host: Host,
    download_url: String,
    session: Option<Session>,
    subscription: Option<SubscriptionInfo>,
    view: SubscriptionView,
}

impl SubscriptionViewer {
    pub fn new(api: ApiClient, host: Host) -> Self {
        Self::with_download_url(api, host, DEFAULT_DOWNLOAD_URL)
    }

    pub fn with_download_url(api: ApiClient, host: Host, download_url: impl Into<String>) -> Self {
        Self {
            api,
            host,
            download_url: download_url.into(),
            session: None,
            subscription: None,
            view: SubscriptionView::default(),
        }
    }

    pub fn view(&self) -> &SubscriptionView {
        &self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(message = %message, "Subscription viewer error");
        self.view.error = Some(message);
    }

    /// Загрузка страницы: аутентификация, затем подписка. Ошибки показываются в карточке.
    pub async fn init(&mut self) {
        let (runtime, init_data) = match session::prepare(&self.host) {
            Ok(prepared) => prepared,
            Err(error) => {
                self.show_error(error.to_string());
                return;
            }
        };

        let session = match session::authenticate(runtime, init_data, &self.api).await {
            Ok(session) => session,
            Err(BootstrapError::Auth(error)) => {
                self.show_error(error.prefixed_message("Ошибка аутентификации"));
                return;
            }
            Err(error) => {
                self.show_error(error.to_string());
                return;
            }
        };

        match self.api.my_subscription(&session.init_data).await {
            Ok(info) => {
                tracing::info!(
                    subscription_id = ?info.subscription_id,
                    status = ?info.status,
                    "Subscription loaded"
                );
                self.view.apply(&info);
                self.subscription = Some(info);
            }
            Err(error) => self.show_error(error.prefixed_message("Ошибка загрузки подписки")),
        }
        self.session = Some(session);
    }

    /// Переключение вкладки инструкций. Сети не касается.
    pub fn select_tab(&mut self, key: &str) {
        self.view.active_tab = key.to_string();
        self.view.tab_content = instructions_for(key);
    }

    pub fn subscription_url(&self) -> Option<&str> {
        self.subscription
            .as_ref()
            .and_then(|info| info.sub_url.as_deref())
    }

    pub async fn copy_link(&mut self) {
        let Some(url) = self.subscription_url().map(str::to_string) else {
            return;
        };
        let Some(runtime) = self.host.runtime().cloned() else {
            self.show_error(COPY_FAILED_TEXT);
            return;
        };

        match runtime.write_clipboard(&url).await {
            Ok(()) => {
                runtime.show_popup(Popup::new("Скопировано", "Ссылка подписки в буфере"));
            }
            Err(error) => {
                tracing::warn!(error = %error, "Clipboard write failed");
                self.show_error(COPY_FAILED_TEXT);
            }
        }
    }

    pub fn open_download(&self) {
        self.open_link(&self.download_url);
    }

    /// Открывает ссылку подписки, чтобы клиент VPN импортировал её.
    pub fn add_to_app(&self) {
        if let Some(url) = self.subscription_url() {
            self.open_link(url);
        }
    }

    fn open_link(&self, url: &str) {
        match &self.host {
            Host::Available(runtime) => runtime.open_link(url),
            Host::Unavailable => {
                tracing::warn!(url = %url, "Cannot open link without Telegram WebApp host");
            }
        }
    }
}

//! Возможности хост-окружения Telegram WebApp, доступные мини-приложению.

use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

impl Popup {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Диалог из двух кнопок: разрушительное действие и отмена.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Confirmed,
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HostRuntime: Send + Sync {
    /// Сигнал хосту, что приложение готово к показу.
    fn ready(&self);

    fn init_data(&self) -> Option<String>;

    fn show_alert(&self, message: &str);

    fn show_popup(&self, popup: Popup);

    /// Закрытие диалога без выбора считается отменой.
    async fn confirm(&self, dialog: ConfirmDialog) -> ConfirmChoice;

    fn open_link(&self, url: &str);

    async fn write_clipboard(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Хост либо есть, либо нет; вызывающий код обязан разобрать оба случая.
#[derive(Clone)]
pub enum Host {
    Available(Arc<dyn HostRuntime>),
    Unavailable,
}

impl Host {
    pub fn available(runtime: impl HostRuntime + 'static) -> Self {
        Host::Available(Arc::new(runtime))
    }

    pub fn runtime(&self) -> Option<&Arc<dyn HostRuntime>> {
        match self {
            Host::Available(runtime) => Some(runtime),
            Host::Unavailable => None,
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Host::Available(_) => f.write_str("Host::Available"),
            Host::Unavailable => f.write_str("Host::Unavailable"),
        }
    }
}

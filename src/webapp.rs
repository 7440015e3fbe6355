//! Мини-приложение Telegram: кабинет пользователя и админ-панель серверов.

pub mod admin;
pub mod host;
pub mod instructions;
pub mod render;
pub mod session;
pub mod subscription;

pub use admin::{AdminPanel, TableAction};
pub use host::{Host, HostRuntime};
pub use subscription::SubscriptionViewer;

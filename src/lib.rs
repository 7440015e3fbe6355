//! vpn-cabinet — клиентская часть VPN-кабинета в Telegram.
//!
//! Мини-приложение (кабинет пользователя и админ-панель серверов) поверх REST API
//! backend'а и бот-запускатель, открывающий его через WebApp-кнопки.

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod init_data;
pub mod model;
pub mod transport;
pub mod webapp;

pub use error::ApiError;

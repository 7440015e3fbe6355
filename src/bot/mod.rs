//! Бот-запускатель: открывает мини-приложение и показывает сводку подписки.

pub mod handlers;
pub mod keyboards;

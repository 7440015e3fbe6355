//! Клавиатуры бота: постоянное меню и inline-кнопки открытия мини-приложения.

use reqwest::Url;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, WebAppInfo,
};

pub const BTN_CABINET: &str = "Личный кабинет";
pub const BTN_SUBSCRIPTION: &str = "Моя подписка";
pub const BTN_HELP: &str = "Помощь";

pub const CALLBACK_SUBSCRIPTION_QR: &str = "sub:qr";

pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(BTN_CABINET),
            KeyboardButton::new(BTN_SUBSCRIPTION),
        ],
        vec![KeyboardButton::new(BTN_HELP)],
    ])
    .resize_keyboard()
    .persistent()
}

pub fn cabinet_button(webapp_url: Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::default().append_row(vec![InlineKeyboardButton::web_app(
        "Открыть личный кабинет",
        WebAppInfo { url: webapp_url },
    )])
}

pub fn admin_panel_button(admin_url: Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::default().append_row(vec![InlineKeyboardButton::web_app(
        "Открыть админ-панель",
        WebAppInfo { url: admin_url },
    )])
}

/// Кнопки под сводкой подписки; QR — только когда есть ссылка.
pub fn subscription_buttons(webapp_url: Url, has_link: bool) -> InlineKeyboardMarkup {
    let mut markup = cabinet_button(webapp_url);
    if has_link {
        markup = markup.append_row(vec![InlineKeyboardButton::callback(
            "📷 QR-код подписки",
            CALLBACK_SUBSCRIPTION_QR,
        )]);
    }
    markup
}

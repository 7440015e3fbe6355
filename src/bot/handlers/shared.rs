use super::format::render_subscription_summary;
use super::state::BotState;
use crate::model::BotSubscriptionSummary;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use teloxide::prelude::*;
use teloxide::types::InputFile;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub const BACKEND_UNAVAILABLE_TEXT: &str =
    "Не удалось получить данные подписки. Попробуйте позже.";

pub fn callback_message_target(q: &CallbackQuery) -> Option<(ChatId, teloxide::types::MessageId)> {
    q.message.as_ref().map(|msg| (msg.chat().id, msg.id()))
}

pub fn callback_prefix_filter(prefix: &'static str) -> impl Fn(CallbackQuery) -> Option<CallbackQuery> {
    move |q: CallbackQuery| {
        if q.data.as_deref().is_some_and(|payload| payload.starts_with(prefix)) {
            Some(q)
        } else {
            None
        }
    }
}

pub fn build_qr_png_bytes(payload: &str) -> Result<Vec<u8>, anyhow::Error> {
    let qr = QrCode::new(payload.as_bytes())?;
    let image = qr
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(512, 512)
        .build();
    let mut bytes = Vec::new();
    {
        let mut cursor = Cursor::new(&mut bytes);
        DynamicImage::ImageLuma8(image).write_to(&mut cursor, ImageFormat::Png)?;
    }
    Ok(bytes)
}

/// Сводка от backend; ошибка логируется и превращается в `None`.
pub async fn fetch_summary(state: &BotState, tg_user_id: i64) -> Option<BotSubscriptionSummary> {
    match state.api.bot_subscription(&state.bot_token, tg_user_id).await {
        Ok(summary) => {
            tracing::info!(
                user_id = tg_user_id,
                status = ?summary.status,
                subscription_id = ?summary.subscription_id,
                "Subscription summary fetched"
            );
            Some(summary)
        }
        Err(error) => {
            tracing::warn!(
                user_id = tg_user_id,
                error = %error,
                "Не удалось получить сводку подписки"
            );
            None
        }
    }
}

pub async fn send_subscription_summary(
    bot: &Bot,
    chat_id: ChatId,
    tg_user_id: i64,
    state: &BotState,
) -> HandlerResult {
    let Some(summary) = fetch_summary(state, tg_user_id).await else {
        bot.send_message(chat_id, BACKEND_UNAVAILABLE_TEXT)
            .reply_markup(crate::bot::keyboards::main_menu())
            .await?;
        return Ok(());
    };

    let webapp_url = state.config.webapp_url()?;
    bot.send_message(chat_id, render_subscription_summary(&summary))
        .reply_markup(crate::bot::keyboards::subscription_buttons(
            webapp_url,
            summary.sub_url.is_some(),
        ))
        .await?;
    Ok(())
}

pub async fn send_subscription_qr(
    bot: &Bot,
    chat_id: ChatId,
    tg_user_id: i64,
    state: &BotState,
) -> Result<bool, anyhow::Error> {
    let Some(link) = fetch_summary(state, tg_user_id)
        .await
        .and_then(|summary| summary.sub_url)
    else {
        return Ok(false);
    };

    let qr_png = build_qr_png_bytes(&link)?;
    bot.send_photo(
        chat_id,
        InputFile::memory(qr_png).file_name(format!("vpn-subscription-{}.png", tg_user_id)),
    )
    .caption("QR-код ссылки подписки: отсканируйте его в VPN-клиенте.")
    .await?;
    Ok(true)
}

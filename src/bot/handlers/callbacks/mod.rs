use super::shared::{callback_message_target, callback_prefix_filter, send_subscription_qr, HandlerResult};
use super::state::BotState;
use crate::bot::keyboards::CALLBACK_SUBSCRIPTION_QR;
use teloxide::dptree;
use teloxide::prelude::*;

pub fn handler() -> teloxide::dispatching::UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_callback_query().branch(
        dptree::filter_map(callback_prefix_filter(CALLBACK_SUBSCRIPTION_QR))
            .endpoint(callback_subscription_qr),
    )
}

async fn callback_subscription_qr(bot: Bot, q: CallbackQuery, state: BotState) -> HandlerResult {
    let user_id = q.from.id.0 as i64;
    let Some((chat_id, _)) = callback_message_target(&q) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    // Ссылка могла смениться с момента отправки сводки, поэтому запрашиваем заново.
    match send_subscription_qr(&bot, chat_id, user_id, &state).await {
        Ok(true) => {
            bot.answer_callback_query(q.id.clone()).await?;
        }
        Ok(false) => {
            bot.answer_callback_query(q.id.clone())
                .text("Ссылка подписки недоступна")
                .show_alert(true)
                .await?;
        }
        Err(error) => {
            tracing::error!(
                user_id = user_id,
                error = %error,
                "Не удалось отправить QR-код подписки"
            );
            bot.answer_callback_query(q.id.clone())
                .text("Не удалось построить QR-код")
                .show_alert(true)
                .await?;
        }
    }
    Ok(())
}

use super::format::{help_text, welcome_text};
use super::shared::HandlerResult;
use super::state::{is_admin_message, sender_user_id, BotState};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub const ACCESS_DENIED_TEXT: &str = "Доступ запрещён. Добавьте свой tg_id в admin_ids.";

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum BotCommand {
    #[command(description = "Открыть меню")]
    Start,
    #[command(description = "Как подключиться")]
    Help,
    #[command(description = "Админ-панель серверов")]
    Admin,
}

pub fn handler() -> teloxide::dispatching::UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    teloxide::filter_command::<BotCommand, _>()
        .branch(dptree::case![BotCommand::Start].endpoint(cmd_start))
        .branch(dptree::case![BotCommand::Help].endpoint(cmd_help))
        .branch(dptree::case![BotCommand::Admin].endpoint(cmd_admin))
}

pub async fn cmd_start(bot: Bot, msg: Message, _state: BotState) -> HandlerResult {
    tracing::info!(
        user_id = ?sender_user_id(&msg),
        chat_id = msg.chat.id.0,
        "Start command received"
    );
    bot.send_message(msg.chat.id, welcome_text())
        .reply_markup(crate::bot::keyboards::main_menu())
        .await?;
    Ok(())
}

pub async fn cmd_help(bot: Bot, msg: Message, _state: BotState) -> HandlerResult {
    bot.send_message(msg.chat.id, help_text())
        .reply_markup(crate::bot::keyboards::main_menu())
        .await?;
    Ok(())
}

pub async fn cmd_admin(bot: Bot, msg: Message, state: BotState) -> HandlerResult {
    if !is_admin_message(&msg, &state) {
        tracing::warn!(
            user_id = ?sender_user_id(&msg),
            "Admin command rejected for non-admin"
        );
        bot.send_message(msg.chat.id, ACCESS_DENIED_TEXT).await?;
        return Ok(());
    }

    let admin_url = state.config.admin_webapp_url()?;
    tracing::info!(
        user_id = ?sender_user_id(&msg),
        url = %admin_url,
        "Admin panel link sent"
    );
    bot.send_message(msg.chat.id, "Админ-панель серверов:")
        .reply_markup(crate::bot::keyboards::admin_panel_button(admin_url))
        .await?;
    Ok(())
}

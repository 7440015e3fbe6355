use super::commands::cmd_help;
use super::shared::{send_subscription_summary, HandlerResult};
use super::state::{sender_user_id, BotState};
use crate::bot::keyboards::{BTN_CABINET, BTN_SUBSCRIPTION};
use teloxide::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Cabinet,
    Subscription,
    Help,
}

impl MenuAction {
    /// «Помощь» и любой незнакомый текст ведут к справке.
    pub fn from_text(text: &str) -> Self {
        match text {
            BTN_CABINET => MenuAction::Cabinet,
            BTN_SUBSCRIPTION => MenuAction::Subscription,
            _ => MenuAction::Help,
        }
    }
}

pub async fn handle_menu_buttons(bot: Bot, msg: Message, state: BotState) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(user_id) = sender_user_id(&msg) else {
        return Ok(());
    };

    match MenuAction::from_text(text) {
        MenuAction::Cabinet => {
            let webapp_url = state.config.webapp_url()?;
            bot.send_message(msg.chat.id, "Откройте личный кабинет:")
                .reply_markup(crate::bot::keyboards::cabinet_button(webapp_url))
                .await?;
        }
        MenuAction::Subscription => {
            send_subscription_summary(&bot, msg.chat.id, user_id, &state).await?;
        }
        MenuAction::Help => {
            cmd_help(bot, msg, state).await?;
        }
    }

    Ok(())
}

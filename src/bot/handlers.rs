//! Обработчики бота-лаунчера: меню, команды и inline-кнопки.

#[path = "handlers/callbacks/mod.rs"]
mod callbacks;
#[path = "handlers/commands/mod.rs"]
mod commands;
#[path = "handlers/format.rs"]
mod format;
#[path = "handlers/menu.rs"]
mod menu;
#[path = "handlers/shared.rs"]
mod shared;
#[path = "handlers/state.rs"]
mod state;

pub use state::BotState;

use commands::BotCommand;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Команды, которые показываются в меню клиента Telegram.
pub fn command_list() -> Vec<teloxide::types::BotCommand> {
    BotCommand::bot_commands()
}

/// Регистрирует меню команд. Сбой не мешает запуску: бот работает и без него.
pub async fn register_commands(bot: &Bot) {
    if let Err(error) = bot.set_my_commands(command_list()).await {
        tracing::warn!(error = %error, "Не удалось зарегистрировать команды бота");
    }
}

/// Сообщения: сначала команды, затем кнопки меню и прочий текст.
/// Callback-запросы: только QR подписки.
pub fn schema() -> UpdateHandler<HandlerError> {
    let message_handler = Update::filter_message()
        .branch(commands::handler())
        .endpoint(menu::handle_menu_buttons);

    dptree::entry()
        .branch(message_handler)
        .branch(callbacks::handler())
}

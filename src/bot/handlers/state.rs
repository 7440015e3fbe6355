use crate::api::ApiClient;
use crate::config::Config;
use std::sync::Arc;
use teloxide::types::Message;

#[derive(Clone)]
pub struct BotState {
    pub config: Arc<Config>,
    pub api: Arc<ApiClient>,
    pub bot_token: Arc<str>,
}

pub fn sender_user_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().map(|user| user.id.0 as i64)
}

pub fn is_admin_message(msg: &Message, state: &BotState) -> bool {
    sender_user_id(msg).is_some_and(|user_id| state.config.is_admin(user_id))
}

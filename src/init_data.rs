//! initData Telegram WebApp: непрозрачная подписанная строка от хоста.
//!
//! Подпись проверяет backend. Здесь строка только хранится и передаётся дальше;
//! id пользователя извлекается исключительно для логов.

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct InitData(String);

impl InitData {
    /// Пустая строка равносильна отсутствию initData.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `id` из JSON-поля `user`, если оно есть и разбирается.
    pub fn user_id(&self) -> Option<i64> {
        let encoded = self
            .0
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "user")
            .map(|(_, value)| value)?;
        let plus_decoded = encoded.replace('+', " ");
        let decoded = urlencoding::decode(&plus_decoded).ok()?;
        let user: serde_json::Value = serde_json::from_str(&decoded).ok()?;
        user.get("id")?.as_i64()
    }
}

// Подписанные данные не должны попадать в логи целиком.
impl fmt::Debug for InitData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitData")
            .field("user_id", &self.user_id())
            .field("len", &self.0.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "query_id=AAH&user=%7B%22id%22%3A279058397%2C%22first_name%22%3A%22Vlad%22%7D&auth_date=1700000000&hash=abc";

    #[test]
    fn empty_init_data_is_absent() {
        assert!(InitData::new("").is_none());
        assert!(InitData::new("   ").is_none());
    }

    #[test]
    fn extracts_user_id_from_encoded_json() {
        let init_data = InitData::new(SAMPLE).unwrap();
        assert_eq!(init_data.user_id(), Some(279058397));
        assert_eq!(init_data.as_str(), SAMPLE);
    }

    #[test]
    fn user_id_missing_or_malformed() {
        let no_user = InitData::new("query_id=AAH&hash=abc").unwrap();
        assert_eq!(no_user.user_id(), None);

        let broken = InitData::new("user=%7Bnot-json&hash=abc").unwrap();
        assert_eq!(broken.user_id(), None);
    }

    #[test]
    fn plus_in_user_json_decodes_as_space() {
        let init_data =
            InitData::new("user=%7B%22id%22%3A5%2C%22first_name%22%3A%22Ivan+Petrov%22%7D&hash=abc")
                .unwrap();
        assert_eq!(init_data.user_id(), Some(5));
    }

    #[test]
    fn debug_output_hides_raw_payload() {
        let init_data = InitData::new(SAMPLE).unwrap();
        let printed = format!("{:?}", init_data);
        assert!(!printed.contains("hash=abc"), "{printed}");
        assert!(printed.contains("279058397"));
    }
}

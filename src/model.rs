//! Данные, которыми обмениваемся с backend.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_NETWORK: &str = "tcp";
pub const DEFAULT_PROTOCOL: &str = "vless";

/// Запись VPN-сервера. Владелец — backend, клиент держит только копию последнего списка.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub id: i64,
    pub country_code: String,
    #[serde(default)]
    pub name: Option<String>,
    pub host: String,
    pub port: u16,
    pub network: String,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub sni: Option<String>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub enabled: bool,
}

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_string()
}

/// Тело POST/PUT. `port: None` уходит как `null`, backend такой запрос отклонит.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerPayload {
    pub country_code: String,
    pub name: Option<String>,
    pub host: String,
    pub port: Option<u32>,
    pub network: String,
    pub public_key: String,
    pub sni: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl ServerPatch {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    #[default]
    Inactive,
}

impl SubscriptionStatus {
    /// Неизвестные и отсутствующие статусы трактуются как `Inactive`.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("active") => SubscriptionStatus::Active,
            Some("expired") => SubscriptionStatus::Expired,
            _ => SubscriptionStatus::Inactive,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Активна",
            SubscriptionStatus::Expired => "Истекла",
            SubscriptionStatus::Inactive => "Нет подписки",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Inactive => "inactive",
        }
    }
}

fn status_from_wire<'de, D>(deserializer: D) -> Result<SubscriptionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(SubscriptionStatus::from_wire(raw.as_deref()))
}

/// Ответ `GET /api/me/subscription`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubscriptionInfo {
    #[serde(default)]
    pub subscription_id: Option<i64>,
    #[serde(default)]
    pub expires_in_days: Option<i64>,
    #[serde(default)]
    pub sub_url: Option<String>,
    #[serde(default, deserialize_with = "status_from_wire")]
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("admin") => Role::Admin,
            _ => Role::User,
        }
    }
}

fn role_from_wire<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(Role::from_wire(raw.as_deref()))
}

/// Ответ `POST /api/auth/telegram`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub tg_id: Option<i64>,
    #[serde(default, deserialize_with = "role_from_wire")]
    pub role: Role,
}

/// Статус в сводке для бота: у backend здесь свой набор значений.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BotSubscriptionStatus {
    Active,
    Expired,
    Blocked,
    #[default]
    None,
}

impl BotSubscriptionStatus {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some("active") => BotSubscriptionStatus::Active,
            Some("expired") => BotSubscriptionStatus::Expired,
            Some("blocked") => BotSubscriptionStatus::Blocked,
            _ => BotSubscriptionStatus::None,
        }
    }
}

fn bot_status_from_wire<'de, D>(deserializer: D) -> Result<BotSubscriptionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(BotSubscriptionStatus::from_wire(raw.as_deref()))
}

/// Ответ `POST /api/bot/subscription`: сводка подписки для бота.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BotSubscriptionSummary {
    #[serde(default, deserialize_with = "bot_status_from_wire")]
    pub status: BotSubscriptionStatus,
    #[serde(default)]
    pub subscription_id: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub expires_in_days: Option<i64>,
    #[serde(default)]
    pub sub_url: Option<String>,
    #[serde(default)]
    pub servers_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_record_accepts_missing_optionals() {
        let json = r#"{
            "id": 3,
            "country_code": "NL",
            "host": "nl1.example.com",
            "port": 443,
            "network": "tcp",
            "enabled": true
        }"#;
        let record: ServerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.sni, None);
        assert_eq!(record.public_key, None);
        assert_eq!(record.protocol, "vless");
    }

    #[test]
    fn subscription_status_defaults_to_inactive() {
        let missing: SubscriptionInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.status, SubscriptionStatus::Inactive);

        let null: SubscriptionInfo = serde_json::from_str(r#"{"status":null}"#).unwrap();
        assert_eq!(null.status, SubscriptionStatus::Inactive);

        let unknown: SubscriptionInfo = serde_json::from_str(r#"{"status":"frozen"}"#).unwrap();
        assert_eq!(unknown.status, SubscriptionStatus::Inactive);

        let expired: SubscriptionInfo = serde_json::from_str(r#"{"status":"expired"}"#).unwrap();
        assert_eq!(expired.status, SubscriptionStatus::Expired);
    }

    #[test]
    fn role_other_than_admin_is_user() {
        let admin: AuthResponse = serde_json::from_str(r#"{"tg_id":1,"role":"admin"}"#).unwrap();
        assert_eq!(admin.role, Role::Admin);

        let user: AuthResponse = serde_json::from_str(r#"{"tg_id":1,"role":"Admin"}"#).unwrap();
        assert_eq!(user.role, Role::User);

        let missing: AuthResponse = serde_json::from_str(r#"{"tg_id":1}"#).unwrap();
        assert_eq!(missing.role, Role::User);
    }

    #[test]
    fn payload_serializes_empty_optionals_as_null() {
        let payload = ServerPayload {
            country_code: "DE".to_string(),
            name: None,
            host: "de.example.com".to_string(),
            port: Some(8443),
            network: "ws".to_string(),
            public_key: String::new(),
            sni: None,
            enabled: false,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["name"].is_null());
        assert!(value["sni"].is_null());
        assert_eq!(value["port"], 8443);
        assert_eq!(value["enabled"], false);
    }

    #[test]
    fn bot_summary_statuses() {
        let blocked: BotSubscriptionSummary =
            serde_json::from_str(r#"{"status":"blocked","servers_count":3}"#).unwrap();
        assert_eq!(blocked.status, BotSubscriptionStatus::Blocked);
        assert_eq!(blocked.servers_count, 3);

        let none: BotSubscriptionSummary = serde_json::from_str(r#"{"status":"none"}"#).unwrap();
        assert_eq!(none.status, BotSubscriptionStatus::None);
    }

    #[test]
    fn patch_carries_only_enabled() {
        let value = serde_json::to_value(ServerPatch::enabled(true)).unwrap();
        assert_eq!(value, serde_json::json!({ "enabled": true }));
    }
}

//! Ошибки обращения к backend.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Текст ошибки от backend: поле `detail` JSON-ответа или тело целиком.
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Status { body, .. } => extract_detail(body),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Сообщение для показа пользователю; `fallback`, если backend ничего не сообщил.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or_else(|| fallback.to_string())
    }

    /// `"<prefix>: <detail>"` либо просто `prefix`.
    pub fn prefixed_message(&self, prefix: &str) -> String {
        match self.detail() {
            Some(detail) => format!("{}: {}", prefix, detail),
            None => prefix.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        match map.get("detail") {
            Some(Value::String(detail)) if !detail.trim().is_empty() => {
                return Some(detail.trim().to_string());
            }
            // 422 от FastAPI: список ошибок валидации
            Some(other @ (Value::Array(_) | Value::Object(_))) => return Some(other.to_string()),
            _ => {}
        }
    }

    Some(trimmed.to_string())
}

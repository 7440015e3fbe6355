//! Клиент REST API backend'а VPN-кабинета.

use crate::error::ApiError;
use crate::init_data::InitData;
use crate::model::{
    AuthResponse, BotSubscriptionSummary, ServerPatch, ServerPayload, ServerRecord,
    SubscriptionInfo,
};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

pub const INIT_DATA_HEADER: &str = "X-Telegram-Init-Data";
pub const BOT_TOKEN_HEADER: &str = "X-Bot-Token";

const SERVERS_PATH: &str = "/api/admin/servers";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpTransport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn server_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, SERVERS_PATH, id)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.http.send(request).await?;
        if !response.is_success() {
            tracing::warn!(
                method = %method,
                url = %url,
                status = response.status,
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    fn authorized(method: Method, url: String, init_data: &InitData) -> HttpRequest {
        HttpRequest::new(method, url).header(INIT_DATA_HEADER, init_data.as_str())
    }

    fn with_body<B: Serialize>(request: HttpRequest, body: &B) -> Result<HttpRequest, ApiError> {
        Ok(request.json(serde_json::to_value(body)?))
    }

    /// Обмен initData на роль.
    pub async fn auth_telegram(&self, init_data: &InitData) -> Result<AuthResponse, ApiError> {
        let request = HttpRequest::new(Method::Post, self.url("/api/auth/telegram"))
            .json(json!({ "initData": init_data.as_str() }));
        self.fetch(request).await
    }

    pub async fn my_subscription(&self, init_data: &InitData) -> Result<SubscriptionInfo, ApiError> {
        let request = Self::authorized(Method::Get, self.url("/api/me/subscription"), init_data);
        self.fetch(request).await
    }

    pub async fn list_servers(&self, init_data: &InitData) -> Result<Vec<ServerRecord>, ApiError> {
        let request = Self::authorized(Method::Get, self.url(SERVERS_PATH), init_data);
        self.fetch(request).await
    }

    pub async fn create_server(
        &self,
        init_data: &InitData,
        payload: &ServerPayload,
    ) -> Result<ServerRecord, ApiError> {
        let request = Self::authorized(Method::Post, self.url(SERVERS_PATH), init_data);
        self.fetch(Self::with_body(request, payload)?).await
    }

    /// Полная замена записи.
    pub async fn update_server(
        &self,
        init_data: &InitData,
        id: i64,
        payload: &ServerPayload,
    ) -> Result<ServerRecord, ApiError> {
        let request = Self::authorized(Method::Put, self.server_url(id), init_data);
        self.fetch(Self::with_body(request, payload)?).await
    }

    pub async fn patch_server(
        &self,
        init_data: &InitData,
        id: i64,
        patch: &ServerPatch,
    ) -> Result<ServerRecord, ApiError> {
        let request = Self::authorized(Method::Patch, self.server_url(id), init_data);
        self.fetch(Self::with_body(request, patch)?).await
    }

    pub async fn delete_server(&self, init_data: &InitData, id: i64) -> Result<(), ApiError> {
        let request = Self::authorized(Method::Delete, self.server_url(id), init_data);
        self.execute(request).await?;
        Ok(())
    }

    /// Сводка подписки для бота; авторизация по токену бота, а не по initData.
    pub async fn bot_subscription(
        &self,
        bot_token: &str,
        tg_id: i64,
    ) -> Result<BotSubscriptionSummary, ApiError> {
        let request = HttpRequest::new(Method::Post, self.url("/api/bot/subscription"))
            .header(BOT_TOKEN_HEADER, bot_token)
            .json(json!({ "tg_id": tg_id }));
        self.fetch(request).await
    }
}

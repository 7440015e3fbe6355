//! Админ-панель: реестр VPN-серверов.
//!
//! Каждая мутация — отдельный запрос, после успеха список перечитывается целиком.
//! Локальная копия списка никогда не правится на месте.

use super::host::{ConfirmChoice, ConfirmDialog, Host, HostRuntime, Popup};
use super::render::render_servers_table;
use super::session::{self, Session};
use crate::api::ApiClient;
use crate::model::{DEFAULT_NETWORK, ServerPatch, ServerPayload, ServerRecord};
use std::sync::Arc;

pub const ACCESS_DENIED_TEXT: &str = "Доступ запрещен. Нужна роль admin.";
pub const AUTH_FAILED_TEXT: &str = "Ошибка авторизации";
pub const NEW_SERVER_TITLE: &str = "Новый сервер";

/// Значения полей формы в том виде, в каком их ввёл админ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerForm {
    pub title: String,
    pub server_id: String,
    pub country_code: String,
    pub name: String,
    pub host: String,
    pub port: String,
    pub network: String,
    pub public_key: String,
    pub sni: String,
    pub enabled: bool,
}

impl Default for ServerForm {
    fn default() -> Self {
        Self {
            title: NEW_SERVER_TITLE.to_string(),
            server_id: String::new(),
            country_code: String::new(),
            name: String::new(),
            host: String::new(),
            port: String::new(),
            network: DEFAULT_NETWORK.to_string(),
            public_key: String::new(),
            sni: String::new(),
            enabled: true,
        }
    }
}

impl ServerForm {
    pub fn from_record(record: &ServerRecord) -> Self {
        Self {
            title: format!("Редактирование #{}", record.id),
            server_id: record.id.to_string(),
            country_code: record.country_code.clone(),
            name: record.name.clone().unwrap_or_default(),
            host: record.host.clone(),
            port: record.port.to_string(),
            network: record.network.clone(),
            public_key: record.public_key.clone().unwrap_or_default(),
            sni: record.sni.clone().unwrap_or_default(),
            enabled: record.enabled,
        }
    }

    /// Только обрезка пробелов и приведение порта; остальное проверяет backend.
    pub fn to_payload(&self) -> ServerPayload {
        ServerPayload {
            country_code: self.country_code.trim().to_string(),
            name: non_empty(&self.name),
            host: self.host.trim().to_string(),
            port: coerce_port(&self.port),
            network: self.network.clone(),
            public_key: self.public_key.trim().to_string(),
            sni: non_empty(&self.sni),
            enabled: self.enabled,
        }
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Пустое поле даёт 0, нечисловое — `None`.
pub fn coerce_port(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<u32>().ok()
}

/// Действие кнопки в строке таблицы.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Edit(i64),
    Delete(i64),
}

impl TableAction {
    /// Разбор `data-action` / `data-id`. Id 0 допустим.
    pub fn parse(action: Option<&str>, id: Option<&str>) -> Option<Self> {
        let id = id?.trim().parse::<i64>().ok()?;
        match action? {
            "edit" => Some(TableAction::Edit(id)),
            "delete" => Some(TableAction::Delete(id)),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminState {
    /// `None` — режим создания.
    pub editing_id: Option<i64>,
    pub servers: Vec<ServerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminView {
    /// Хост недоступен: алерт показать некуда, текст выводится на странице.
    pub fatal_error: Option<String>,
    pub access_visible: bool,
    pub access_message: String,
    pub servers_visible: bool,
    pub form_visible: bool,
    pub table_html: String,
}

impl Default for AdminView {
    fn default() -> Self {
        Self {
            fatal_error: None,
            access_visible: false,
            access_message: String::new(),
            servers_visible: true,
            form_visible: true,
            table_html: String::new(),
        }
    }
}

pub struct AdminPanel {
    api: ApiClient,
    host: Host,
    session: Option<Session>,
    state: AdminState,
    form: ServerForm,
    view: AdminView,
}

impl AdminPanel {
    pub fn new(api: ApiClient, host: Host) -> Self {
        Self {
            api,
            host,
            session: None,
            state: AdminState::default(),
            form: ServerForm::default(),
            view: AdminView::default(),
        }
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    pub fn form(&self) -> &ServerForm {
        &self.form
    }

    /// Поля формы для ввода со страницы.
    pub fn form_mut(&mut self) -> &mut ServerForm {
        &mut self.form
    }

    pub fn view(&self) -> &AdminView {
        &self.view
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    fn ready_session(&self) -> Option<Session> {
        let session = self.session.clone();
        if session.is_none() {
            tracing::debug!("Admin action ignored before successful bootstrap");
        }
        session
    }

    fn alert(runtime: &dyn HostRuntime, message: &str) {
        tracing::warn!(message = %message, "Admin panel error");
        runtime.show_alert(message);
    }

    fn notify(runtime: &dyn HostRuntime, message: &str) {
        runtime.show_popup(Popup::new("Успех", message));
    }

    pub async fn bootstrap(&mut self) {
        let (runtime, init_data) = match session::prepare(&self.host) {
            Ok(prepared) => prepared,
            Err(error) => {
                let message = error.to_string();
                match self.host.runtime() {
                    Some(runtime) => Self::alert(runtime.as_ref(), &message),
                    None => self.view.fatal_error = Some(message),
                }
                return;
            }
        };

        self.view.access_visible = true;
        let session = match session::authenticate(Arc::clone(&runtime), init_data, &self.api).await {
            Ok(session) => session,
            Err(error) => {
                self.view.access_message = AUTH_FAILED_TEXT.to_string();
                Self::alert(runtime.as_ref(), &error.to_string());
                return;
            }
        };

        if !session.is_admin() {
            tracing::warn!(tg_id = ?session.init_data.user_id(), "Admin panel opened without admin role");
            self.view.access_message = ACCESS_DENIED_TEXT.to_string();
            self.view.servers_visible = false;
            self.view.form_visible = false;
            return;
        }

        self.view.access_visible = false;
        self.session = Some(session);
        self.load_servers().await;
    }

    /// Перечитать список. При ошибке прежняя таблица остаётся на экране.
    pub async fn load_servers(&mut self) {
        let Some(session) = self.ready_session() else {
            return;
        };
        match self.api.list_servers(&session.init_data).await {
            Ok(servers) => {
                tracing::info!(count = servers.len(), "Servers loaded");
                self.state.servers = servers;
                self.view.table_html = render_servers_table(&self.state.servers);
            }
            Err(error) => Self::alert(
                session.runtime(),
                &error.user_message("Не удалось загрузить сервера"),
            ),
        }
    }

    pub async fn refresh(&mut self) {
        self.load_servers().await;
    }

    /// Отправка формы: PUT при заданном `editing_id`, иначе POST.
    pub async fn submit(&mut self) {
        let Some(session) = self.ready_session() else {
            return;
        };
        let payload = self.form.to_payload();

        let result = match self.state.editing_id {
            Some(id) => {
                tracing::info!(server_id = id, host = %payload.host, "Updating server");
                self.api
                    .update_server(&session.init_data, id, &payload)
                    .await
                    .map(|_| "Сервер обновлен")
                    .map_err(|e| e.user_message("Не удалось обновить сервер"))
            }
            None => {
                tracing::info!(host = %payload.host, "Creating server");
                self.api
                    .create_server(&session.init_data, &payload)
                    .await
                    .map(|_| "Сервер добавлен")
                    .map_err(|e| e.user_message("Не удалось создать сервер"))
            }
        };

        match result {
            Ok(message) => {
                Self::notify(session.runtime(), message);
                self.reset_form();
                self.load_servers().await;
            }
            Err(message) => Self::alert(session.runtime(), &message),
        }
    }

    pub fn fill_form(&mut self, record: &ServerRecord) {
        self.state.editing_id = Some(record.id);
        self.form = ServerForm::from_record(record);
    }

    pub fn reset_form(&mut self) {
        self.state.editing_id = None;
        self.form = ServerForm::default();
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Клик по кнопке в таблице. Неизвестные id молча игнорируются.
    pub async fn handle_table_action(&mut self, action: TableAction) {
        match action {
            TableAction::Edit(id) => {
                let Some(record) = self.find_server(id).cloned() else {
                    return;
                };
                self.fill_form(&record);
            }
            TableAction::Delete(id) => self.delete_server(id).await,
        }
    }

    fn find_server(&self, id: i64) -> Option<&ServerRecord> {
        self.state.servers.iter().find(|server| server.id == id)
    }

    /// Удаление только после подтверждения; отмена не делает запросов.
    pub async fn delete_server(&mut self, id: i64) {
        let Some(session) = self.ready_session() else {
            return;
        };
        let Some(host) = self.find_server(id).map(|server| server.host.clone()) else {
            return;
        };

        let dialog = ConfirmDialog {
            title: "Удалить сервер?".to_string(),
            message: format!("#{} ({}) будет удален", id, host),
            confirm_text: "Удалить".to_string(),
            cancel_text: "Отмена".to_string(),
        };
        if session.runtime().confirm(dialog).await != ConfirmChoice::Confirmed {
            tracing::debug!(server_id = id, "Server deletion cancelled");
            return;
        }

        tracing::info!(server_id = id, "Deleting server");
        match self.api.delete_server(&session.init_data, id).await {
            Ok(()) => {
                Self::notify(session.runtime(), "Сервер удален");
                self.load_servers().await;
            }
            Err(error) => Self::alert(session.runtime(), &error.user_message("Не удалось удалить сервер")),
        }
    }

    pub async fn toggle_enabled(&mut self, id: i64, enabled: bool) {
        let Some(session) = self.ready_session() else {
            return;
        };
        tracing::info!(server_id = id, enabled = enabled, "Toggling server");
        match self
            .api
            .patch_server(&session.init_data, id, &ServerPatch::enabled(enabled))
            .await
        {
            Ok(_) => self.load_servers().await,
            Err(error) => Self::alert(
                session.runtime(),
                &error.user_message("Не удалось обновить сервер"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, Method, MockHttpTransport};
    use crate::webapp::host::MockHostRuntime;
    use mockall::Sequence;

    const SERVERS_URL: &str = "https://cabinet.example.com/api/admin/servers";
    const TWO_SERVERS: &str = r#"[
        {"id":1,"country_code":"NL","name":"Amsterdam","host":"nl1.example.com","port":443,"network":"tcp","public_key":"pk1","sni":"www.microsoft.com","enabled":true},
        {"id":2,"country_code":"DE","name":null,"host":"de1.example.com","port":8443,"network":"ws","public_key":"pk2","sni":null,"enabled":false}
    ]"#;

    fn ok(body: &'static str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    fn host(role_check: impl FnOnce(&mut MockHostRuntime)) -> Host {
        let mut host = MockHostRuntime::new();
        host.expect_ready().returning(|| ());
        host.expect_init_data()
            .returning(|| Some("query_id=1&hash=abc".to_string()));
        role_check(&mut host);
        Host::available(host)
    }

    fn expect_auth(http: &mut MockHttpTransport, role: &'static str) {
        let body = if role == "admin" {
            r#"{"tg_id":1,"role":"admin"}"#
        } else {
            r#"{"tg_id":1,"role":"user"}"#
        };
        http.expect_send()
            .withf(|req| req.url.ends_with("/api/auth/telegram"))
            .times(1)
            .returning(move |_| Box::pin(async move { Ok(ok(body)) }));
    }

    fn expect_list(http: &mut MockHttpTransport, times: usize) {
        http.expect_send()
            .withf(|req| req.method == Method::Get && req.url == SERVERS_URL)
            .times(times)
            .returning(|_| Box::pin(async { Ok(ok(TWO_SERVERS)) }));
    }

    fn panel(http: MockHttpTransport, host: Host) -> AdminPanel {
        AdminPanel::new(ApiClient::new("https://cabinet.example.com", Arc::new(http)), host)
    }

    async fn ready_panel(mut http: MockHttpTransport, host: Host, list_fetches: usize) -> AdminPanel {
        expect_auth(&mut http, "admin");
        expect_list(&mut http, list_fetches);
        let mut panel = panel(http, host);
        panel.bootstrap().await;
        assert!(panel.is_ready());
        panel
    }

    #[tokio::test]
    async fn bootstrap_as_admin_loads_table() {
        let panel = ready_panel(MockHttpTransport::new(), host(|_| {}), 1).await;

        assert_eq!(panel.state().servers.len(), 2);
        assert!(!panel.view().access_visible);
        assert!(panel.view().table_html.contains("nl1.example.com"));
        assert_eq!(panel.view().table_html.matches("<td>—</td>").count(), 2);
    }

    #[tokio::test]
    async fn non_admin_role_is_denied_without_list_fetch() {
        let mut http = MockHttpTransport::new();
        expect_auth(&mut http, "user");
        let mut panel = panel(http, host(|_| {}));
        panel.bootstrap().await;

        assert!(!panel.is_ready());
        assert!(panel.view().access_visible);
        assert_eq!(panel.view().access_message, ACCESS_DENIED_TEXT);
        assert!(!panel.view().servers_visible);
        assert!(!panel.view().form_visible);
    }

    #[tokio::test]
    async fn auth_failure_alerts_and_marks_access_panel() {
        let mut http = MockHttpTransport::new();
        http.expect_send().times(1).returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 401,
                    body: "bad".to_string(),
                })
            })
        });
        let host = host(|h| {
            h.expect_show_alert()
                .withf(|msg| msg == "Ошибка аутентификации")
                .times(1)
                .returning(|_| ());
        });
        let mut panel = panel(http, host);
        panel.bootstrap().await;

        assert_eq!(panel.view().access_message, AUTH_FAILED_TEXT);
        assert!(!panel.is_ready());
    }

    #[tokio::test]
    async fn unavailable_host_is_fatal_and_silent_on_network() {
        let mut http = MockHttpTransport::new();
        http.expect_send().times(0);
        let mut panel = panel(http, Host::Unavailable);
        panel.bootstrap().await;

        assert_eq!(
            panel.view().fatal_error.as_deref(),
            Some("Telegram WebApp API недоступно")
        );
    }

    #[tokio::test]
    async fn toggle_patches_once_then_reloads_once() {
        let mut http = MockHttpTransport::new();
        let mut seq = Sequence::new();
        http.expect_send()
            .withf(|req| req.url.ends_with("/api/auth/telegram"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(ok(r#"{"tg_id":1,"role":"admin"}"#)) }));
        http.expect_send()
            .withf(|req| req.method == Method::Get)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(ok(TWO_SERVERS)) }));
        http.expect_send()
            .withf(|req| {
                req.method == Method::Patch
                    && req.url == format!("{}/2", SERVERS_URL)
                    && req.body == Some(serde_json::json!({ "enabled": true }))
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok(ok(r#"{"id":2,"country_code":"DE","host":"de1.example.com","port":8443,"network":"ws","enabled":true}"#))
                })
            });
        http.expect_send()
            .withf(|req| req.method == Method::Get)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(ok(TWO_SERVERS)) }));

        let mut panel = panel(http, host(|_| {}));
        panel.bootstrap().await;
        panel.toggle_enabled(2, true).await;
    }

    #[tokio::test]
    async fn cancelled_delete_makes_no_requests() {
        let host = host(|h| {
            h.expect_confirm()
                .withf(|dialog| {
                    dialog.title == "Удалить сервер?" && dialog.message == "#1 (nl1.example.com) будет удален"
                })
                .times(1)
                .returning(|_| Box::pin(async { ConfirmChoice::Cancelled }));
        });
        // Только начальная загрузка; DELETE и повторный GET не ожидаются.
        let mut panel = ready_panel(MockHttpTransport::new(), host, 1).await;
        panel.handle_table_action(TableAction::Delete(1)).await;
        assert_eq!(panel.state().servers.len(), 2);
    }

    #[tokio::test]
    async fn confirmed_delete_issues_one_delete_and_one_refresh() {
        let mut http = MockHttpTransport::new();
        http.expect_send()
            .withf(|req| req.method == Method::Delete && req.url == format!("{}/1", SERVERS_URL))
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 204,
                        body: String::new(),
                    })
                })
            });
        let host = host(|h| {
            h.expect_confirm()
                .times(1)
                .returning(|_| Box::pin(async { ConfirmChoice::Confirmed }));
            h.expect_show_popup()
                .withf(|popup| popup.message == "Сервер удален")
                .times(1)
                .returning(|_| ());
        });
        let mut panel = ready_panel(http, host, 2).await;
        panel.delete_server(1).await;
    }

    #[tokio::test]
    async fn submit_without_editing_id_posts() {
        let mut http = MockHttpTransport::new();
        http.expect_send()
            .withf(|req| {
                req.method == Method::Post
                    && req.url == SERVERS_URL
                    && req.body.as_ref().is_some_and(|body| {
                        body["host"] == "fi.example.com"
                            && body["name"].is_null()
                            && body["port"] == 443
                            && body["country_code"] == "FI"
                    })
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(ok(r#"{"id":3,"country_code":"FI","host":"fi.example.com","port":443,"network":"tcp","enabled":true}"#))
                })
            });
        let host = host(|h| {
            h.expect_show_popup()
                .withf(|popup| popup.message == "Сервер добавлен")
                .times(1)
                .returning(|_| ());
        });
        let mut panel = ready_panel(http, host, 2).await;

        let form = panel.form_mut();
        form.country_code = " FI ".to_string();
        form.name = "   ".to_string();
        form.host = " fi.example.com".to_string();
        form.port = "443".to_string();
        panel.submit().await;

        assert_eq!(panel.form(), &ServerForm::default());
        assert_eq!(panel.state().editing_id, None);
    }

    #[tokio::test]
    async fn submit_while_editing_puts_to_that_id() {
        let mut http = MockHttpTransport::new();
        http.expect_send()
            .withf(|req| req.method == Method::Put && req.url == format!("{}/2", SERVERS_URL))
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(ok(r#"{"id":2,"country_code":"DE","host":"de2.example.com","port":8443,"network":"ws","enabled":false}"#))
                })
            });
        let host = host(|h| {
            h.expect_show_popup()
                .withf(|popup| popup.message == "Сервер обновлен")
                .times(1)
                .returning(|_| ());
        });
        let mut panel = ready_panel(http, host, 2).await;

        panel.handle_table_action(TableAction::Edit(2)).await;
        assert_eq!(panel.state().editing_id, Some(2));
        assert_eq!(panel.form().title, "Редактирование #2");
        assert_eq!(panel.form().name, "");
        panel.form_mut().host = "de2.example.com".to_string();
        panel.submit().await;
    }

    #[tokio::test]
    async fn failed_mutation_keeps_form_and_skips_refresh() {
        let mut http = MockHttpTransport::new();
        http.expect_send()
            .withf(|req| req.method == Method::Put)
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 422,
                        body: r#"{"detail":"port out of range"}"#.to_string(),
                    })
                })
            });
        let host = host(|h| {
            h.expect_show_alert()
                .withf(|msg| msg == "port out of range")
                .times(1)
                .returning(|_| ());
            h.expect_show_popup().times(0);
        });
        // Только начальная загрузка списка.
        let mut panel = ready_panel(http, host, 1).await;

        panel.handle_table_action(TableAction::Edit(1)).await;
        panel.form_mut().port = "70000".to_string();
        let before = panel.form().clone();
        panel.submit().await;

        assert_eq!(panel.form(), &before);
        assert_eq!(panel.state().editing_id, Some(1));
    }

    fn server_error() -> HttpResponse {
        HttpResponse {
            status: 500,
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn failed_create_keeps_form_and_skips_refresh() {
        let mut http = MockHttpTransport::new();
        http.expect_send()
            .withf(|req| req.method == Method::Post && req.url == SERVERS_URL)
            .times(1)
            .returning(|_| Box::pin(async { Ok(server_error()) }));
        let host = host(|h| {
            h.expect_show_alert()
                .withf(|msg| msg == "Не удалось создать сервер")
                .times(1)
                .returning(|_| ());
            h.expect_show_popup().times(0);
        });
        let mut panel = ready_panel(http, host, 1).await;

        panel.form_mut().country_code = "FI".to_string();
        panel.form_mut().host = "fi.example.com".to_string();
        let before = panel.form().clone();
        panel.submit().await;

        assert_eq!(panel.form(), &before);
        assert_eq!(panel.state().editing_id, None);
        assert_eq!(panel.state().servers.len(), 2);
    }

    #[tokio::test]
    async fn failed_toggle_alerts_and_skips_refresh() {
        let mut http = MockHttpTransport::new();
        http.expect_send()
            .withf(|req| req.method == Method::Patch && req.url == format!("{}/1", SERVERS_URL))
            .times(1)
            .returning(|_| Box::pin(async { Ok(server_error()) }));
        let host = host(|h| {
            h.expect_show_alert()
                .withf(|msg| msg == "Не удалось обновить сервер")
                .times(1)
                .returning(|_| ());
        });
        let mut panel = ready_panel(http, host, 1).await;
        let table_before = panel.view().table_html.clone();

        panel.toggle_enabled(1, false).await;

        assert_eq!(panel.view().table_html, table_before);
    }

    #[tokio::test]
    async fn failed_delete_with_empty_body_alerts_fallback_and_skips_refresh() {
        let mut http = MockHttpTransport::new();
        http.expect_send()
            .withf(|req| req.method == Method::Delete && req.url == format!("{}/1", SERVERS_URL))
            .times(1)
            .returning(|_| Box::pin(async { Ok(server_error()) }));
        let host = host(|h| {
            h.expect_confirm()
                .times(1)
                .returning(|_| Box::pin(async { ConfirmChoice::Confirmed }));
            h.expect_show_alert()
                .withf(|msg| msg == "Не удалось удалить сервер")
                .times(1)
                .returning(|_| ());
            h.expect_show_popup().times(0);
        });
        let mut panel = ready_panel(http, host, 1).await;

        panel.handle_table_action(TableAction::Delete(1)).await;

        assert_eq!(panel.state().servers.len(), 2);
    }

    #[tokio::test]
    async fn missing_init_data_alerts_without_network() {
        let mut http = MockHttpTransport::new();
        http.expect_send().times(0);
        let mut runtime = MockHostRuntime::new();
        runtime.expect_ready().times(1).returning(|| ());
        runtime.expect_init_data().returning(|| None);
        runtime
            .expect_show_alert()
            .withf(|msg| msg == "initData не найдено")
            .times(1)
            .returning(|_| ());

        let mut panel = panel(http, Host::available(runtime));
        panel.bootstrap().await;

        assert!(!panel.is_ready());
        assert_eq!(panel.view().fatal_error, None);
    }

    #[tokio::test]
    async fn edit_of_unknown_id_leaves_form_untouched() {
        let mut panel = ready_panel(MockHttpTransport::new(), host(|_| {}), 1).await;

        panel.handle_table_action(TableAction::Edit(99)).await;

        assert_eq!(panel.state().editing_id, None);
        assert_eq!(panel.form(), &ServerForm::default());
    }

    #[tokio::test]
    async fn failed_list_keeps_previous_table() {
        let mut http = MockHttpTransport::new();
        let mut seq = Sequence::new();
        http.expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(ok(r#"{"tg_id":1,"role":"admin"}"#)) }));
        http.expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(ok(TWO_SERVERS)) }));
        http.expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Err(crate::error::ApiError::Transport("down".to_string())) }));
        let host = host(|h| {
            h.expect_show_alert()
                .withf(|msg| msg == "Не удалось загрузить сервера")
                .times(1)
                .returning(|_| ());
        });

        let mut panel = panel(http, host);
        panel.bootstrap().await;
        let table_before = panel.view().table_html.clone();
        panel.refresh().await;

        assert_eq!(panel.view().table_html, table_before);
        assert_eq!(panel.state().servers.len(), 2);
    }

    #[test]
    fn table_action_parsing() {
        assert_eq!(TableAction::parse(Some("edit"), Some("4")), Some(TableAction::Edit(4)));
        assert_eq!(TableAction::parse(Some("delete"), Some("0")), Some(TableAction::Delete(0)));
        assert_eq!(TableAction::parse(Some("clone"), Some("4")), None);
        assert_eq!(TableAction::parse(None, Some("4")), None);
        assert_eq!(TableAction::parse(Some("edit"), Some("abc")), None);
        assert_eq!(TableAction::parse(Some("edit"), None), None);
    }

    #[test]
    fn port_coercion() {
        assert_eq!(coerce_port(""), Some(0));
        assert_eq!(coerce_port(" 443 "), Some(443));
        assert_eq!(coerce_port("https"), None);
    }

    #[test]
    fn form_round_trips_record_fields() {
        let record = ServerRecord {
            id: 8,
            country_code: "FI".to_string(),
            name: Some("Helsinki".to_string()),
            host: "fi.example.com".to_string(),
            port: 443,
            network: "xhttp".to_string(),
            public_key: Some("pk".to_string()),
            sni: None,
            protocol: "vless".to_string(),
            enabled: false,
        };
        let payload = ServerForm::from_record(&record).to_payload();
        assert_eq!(payload.name.as_deref(), Some("Helsinki"));
        assert_eq!(payload.sni, None);
        assert_eq!(payload.port, Some(443));
        assert_eq!(payload.network, "xhttp");
        assert!(!payload.enabled);
    }
}

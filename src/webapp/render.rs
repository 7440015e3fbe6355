//! HTML-разметка мини-приложения. Чистые функции от состояния.

use super::instructions::Platform;
use super::subscription::SubscriptionView;
use crate::model::{ServerRecord, SubscriptionStatus};
use std::fmt::Write;

pub const PLACEHOLDER: &str = "—";
pub const EMPTY_SERVERS_TEXT: &str = "Серверов пока нет";
const SERVERS_TABLE_COLUMNS: usize = 9;

pub fn escape_html(raw: &str) -> String {
    teloxide::utils::html::escape(raw)
}

/// Для значений в атрибутах: `html::escape` не трогает кавычки.
pub fn escape_attr(raw: &str) -> String {
    escape_html(raw).replace('"', "&quot;")
}

/// Пустое или отсутствующее значение показывается прочерком.
pub fn or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => escape_html(text),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `<tbody>` таблицы серверов.
pub fn render_servers_table(servers: &[ServerRecord]) -> String {
    if servers.is_empty() {
        return format!(
            r#"<tr><td colspan="{}" class="muted">{}</td></tr>"#,
            SERVERS_TABLE_COLUMNS, EMPTY_SERVERS_TEXT
        );
    }

    let mut html = String::new();
    for server in servers {
        let (checked, badge_class, badge_text) = if server.enabled {
            (" checked", "enabled", "On")
        } else {
            ("", "disabled", "Off")
        };
        let _ = write!(
            html,
            concat!(
                "<tr>",
                "<td>{id}</td>",
                "<td>{country}</td>",
                "<td>{name}</td>",
                "<td>{host}</td>",
                "<td>{port}</td>",
                "<td>{network}</td>",
                "<td>{sni}</td>",
                "<td><label class=\"switch\">",
                "<input type=\"checkbox\"{checked} data-id=\"{id}\" class=\"toggle-enabled\" />",
                "<span class=\"badge-table {badge_class}\">{badge_text}</span>",
                "</label></td>",
                "<td>",
                "<button class=\"action-btn action-small\" data-id=\"{id}\" data-action=\"edit\">Редактировать</button>",
                "<button class=\"action-btn action-small secondary\" data-id=\"{id}\" data-action=\"delete\">Удалить</button>",
                "</td>",
                "</tr>"
            ),
            id = server.id,
            country = escape_html(&server.country_code),
            name = or_placeholder(server.name.as_deref()),
            host = escape_html(&server.host),
            port = server.port,
            network = escape_html(&server.network),
            sni = or_placeholder(server.sni.as_deref()),
            checked = checked,
            badge_class = badge_class,
            badge_text = badge_text,
        );
    }
    html
}

pub fn render_status_badge(status: SubscriptionStatus) -> String {
    format!(
        r#"<span id="sub-status" class="badge {}">{}</span>"#,
        status.css_class(),
        status.label()
    )
}

pub fn render_subscription_card(view: &SubscriptionView) -> String {
    let mut html = String::from(r#"<section id="subscription-card" class="card">"#);
    html.push_str(&render_status_badge(view.status));
    let _ = write!(
        html,
        concat!(
            "<div class=\"row\"><span>ID</span><span id=\"sub-id\">{id}</span></div>",
            "<div class=\"row\"><span>Осталось</span><span id=\"sub-days\">{days}</span></div>",
            "<input id=\"sub-url\" readonly value=\"{url}\" />",
            "<button id=\"copy-btn\" class=\"action-btn\"{disabled}>Скопировать</button>"
        ),
        id = escape_html(&view.subscription_id),
        days = escape_html(&view.days),
        url = escape_attr(&view.url),
        disabled = if view.copy_enabled { "" } else { " disabled" },
    );
    if let Some(error) = &view.error {
        let _ = write!(html, r#"<div class="error">{}</div>"#, escape_html(error));
    }
    html.push_str("</section>");
    html
}

/// Кнопки вкладок; активной помечается вкладка с ключом `active_key`.
pub fn render_tabs(active_key: &str) -> String {
    let mut html = String::new();
    for platform in Platform::ALL {
        let class = if platform.key() == active_key {
            "tab active"
        } else {
            "tab"
        };
        let _ = write!(
            html,
            r#"<button class="{}" data-platform="{}">{}</button>"#,
            class,
            platform.key(),
            platform.title()
        );
    }
    html
}

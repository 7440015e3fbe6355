use crate::model::{BotSubscriptionStatus, BotSubscriptionSummary};
use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Дата из ISO-строки backend'а в виде `dd.mm.YYYY`; без зоны считается UTC.
pub fn format_date(iso: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        });
    match parsed {
        Ok(dt) => dt.with_timezone(&Local).format("%d.%m.%Y").to_string(),
        Err(_) => "—".to_string(),
    }
}

pub fn format_status(status: BotSubscriptionStatus) -> &'static str {
    match status {
        BotSubscriptionStatus::Active => "✅ Активна",
        BotSubscriptionStatus::Expired => "⌛ Истекла",
        BotSubscriptionStatus::Blocked => "⛔ Заблокирована",
        BotSubscriptionStatus::None => "❌ Нет подписки",
    }
}

pub fn render_subscription_summary(summary: &BotSubscriptionSummary) -> String {
    if summary.status == BotSubscriptionStatus::None {
        return format!(
            "Подписка: {}\n\nДоступно серверов: {}\n\nОткройте личный кабинет, чтобы оформить подписку.",
            format_status(summary.status),
            summary.servers_count
        );
    }

    format!(
        "Подписка: {}\n\
         ID: {}\n\
         Действует до: {}\n\
         Осталось дней: {}\n\
         Доступно серверов: {}\n\n\
         Ссылка подписки:\n{}",
        format_status(summary.status),
        summary
            .subscription_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "—".to_string()),
        summary
            .expires_at
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "—".to_string()),
        summary
            .expires_in_days
            .map(|days| days.to_string())
            .unwrap_or_else(|| "—".to_string()),
        summary.servers_count,
        summary.sub_url.as_deref().unwrap_or("—"),
    )
}

pub fn welcome_text() -> &'static str {
    "Привет! Это бот управления VPN подпиской.\n\
     Нажмите «Личный кабинет», чтобы открыть Mini App, или «Моя подписка» для краткой сводки."
}

pub fn help_text() -> &'static str {
    r#"Как подключиться:

1) Откройте «Личный кабинет» и скопируйте ссылку подписки.
2) Установите клиент для своей платформы (инструкции — во вкладках кабинета).
3) Импортируйте ссылку подписки в клиент и обновите список серверов.

Если что-то не работает — попробуйте обновить приложение или написать в поддержку."#
}

//! Статичные инструкции по настройке клиентов, по вкладке на платформу.

pub const FALLBACK_INSTRUCTIONS: &str = "Инструкция будет позже.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Android,
    Macos,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Windows,
        Platform::Android,
        Platform::Macos,
        Platform::Linux,
    ];

    /// Вкладка, открытая при загрузке.
    pub const DEFAULT: Platform = Platform::Windows;

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|platform| platform.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Android => "android",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Android => "Android",
            Platform::Macos => "macOS",
            Platform::Linux => "Linux",
        }
    }

    pub fn instructions(self) -> &'static str {
        match self {
            Platform::Windows => {
                "1) Скачайте v2rayN: https://github.com/2dust/v2rayN/releases\n\
                 2) Откройте приложение → \"Sub\" → \"Import URL from clipboard\"\n\
                 3) Вставьте ссылку подписки и обновите."
            }
            Platform::Android => {
                "1) Скачайте v2RayTun или Nekoray из Google Play / GitHub.\n\
                 2) Добавьте подписку через кнопку \"Импорт по ссылке\".\n\
                 3) Обновите узлы и выберите любой сервер."
            }
            Platform::Macos => {
                "1) Установите Nekoray для macOS: https://github.com/MatsuriDayo/nekoray/releases\n\
                 2) Импортируйте подписку по ссылке.\n\
                 3) Обновите узлы и выберите сервер."
            }
            Platform::Linux => {
                "1) Установите Clash/Clash.Meta или Nekoray для Linux.\n\
                 2) Добавьте подписку URL и обновите.\n\
                 3) Запустите клиент и выберите сервер."
            }
        }
    }
}

/// Текст для ключа вкладки; неизвестный ключ даёт заглушку.
pub fn instructions_for(key: &str) -> &'static str {
    Platform::from_key(key)
        .map(Platform::instructions)
        .unwrap_or(FALLBACK_INSTRUCTIONS)
}

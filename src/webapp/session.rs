//! Старт мини-приложения: хост → initData → обмен на роль.

use super::host::{Host, HostRuntime};
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::init_data::InitData;
use crate::model::Role;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Telegram WebApp API недоступно")]
    HostUnavailable,
    #[error("initData не найдено")]
    MissingInitData,
    #[error("Ошибка аутентификации")]
    Auth(#[source] ApiError),
}

/// Результат успешного старта. Существует только при доступном хосте.
#[derive(Clone)]
pub struct Session {
    pub init_data: InitData,
    pub role: Role,
    runtime: Arc<dyn HostRuntime>,
}

impl Session {
    pub fn runtime(&self) -> &dyn HostRuntime {
        self.runtime.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("init_data", &self.init_data)
            .field("role", &self.role)
            .finish()
    }
}

/// Хост и initData без сети. `Auth` здесь не возникает.
pub fn prepare(host: &Host) -> Result<(Arc<dyn HostRuntime>, InitData), BootstrapError> {
    let runtime = match host {
        Host::Available(runtime) => Arc::clone(runtime),
        Host::Unavailable => {
            tracing::warn!("Telegram WebApp host is unavailable");
            return Err(BootstrapError::HostUnavailable);
        }
    };
    runtime.ready();

    let Some(init_data) = runtime.init_data().and_then(InitData::new) else {
        tracing::warn!("Host returned empty initData");
        return Err(BootstrapError::MissingInitData);
    };
    Ok((runtime, init_data))
}

/// Одна попытка аутентификации за загрузку страницы: без повторов и таймаута.
pub async fn authenticate(
    runtime: Arc<dyn HostRuntime>,
    init_data: InitData,
    api: &ApiClient,
) -> Result<Session, BootstrapError> {
    let auth = api.auth_telegram(&init_data).await.map_err(|error| {
        tracing::warn!(
            error = %error,
            tg_id = ?init_data.user_id(),
            "Telegram auth exchange failed"
        );
        BootstrapError::Auth(error)
    })?;
    tracing::info!(
        tg_id = ?auth.tg_id.or_else(|| init_data.user_id()),
        role = ?auth.role,
        "Telegram auth exchange succeeded"
    );
    Ok(Session {
        init_data,
        role: auth.role,
        runtime,
    })
}

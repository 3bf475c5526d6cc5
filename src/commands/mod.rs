pub mod dashboard;
pub mod privacy;
pub mod terminal;

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{error, warn};

use crate::config::DashboardConfig;
use crate::error::{AppError, AppResult};
use crate::models::session::Session;
use crate::services::consent_panel::ConsentPanel;
use crate::services::dashboard_shell::DashboardShell;
use crate::services::data_access::{DashboardApi, DataAccessService};
use crate::services::interaction::UserInteraction;

#[derive(Clone)]
pub struct AppState {
    config: DashboardConfig,
    session: Session,
    api: Arc<dyn DashboardApi>,
    interaction: Arc<dyn UserInteraction>,
}

impl AppState {
    pub fn new(config: DashboardConfig, interaction: Arc<dyn UserInteraction>) -> AppResult<Self> {
        let api: Arc<dyn DashboardApi> = Arc::new(DataAccessService::from_config(&config)?);
        Ok(Self::with_api(config, api, interaction))
    }

    pub fn with_api(
        config: DashboardConfig,
        api: Arc<dyn DashboardApi>,
        interaction: Arc<dyn UserInteraction>,
    ) -> Self {
        let session = Session::new(config.user_id.clone());
        Self {
            config,
            session,
            api,
            interaction,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> Arc<dyn DashboardApi> {
        Arc::clone(&self.api)
    }

    /// Seeded from `initial_consent` when configured.
    pub fn consent_panel(&self) -> ConsentPanel {
        let api = Arc::clone(&self.api);
        let interaction = Arc::clone(&self.interaction);
        match &self.config.initial_consent {
            Some(consent) => ConsentPanel::with_initial(
                api,
                self.session.clone(),
                interaction,
                consent.clone(),
            ),
            None => ConsentPanel::new(api, self.session.clone(), interaction),
        }
    }

    pub fn dashboard_shell(&self) -> DashboardShell {
        DashboardShell::new(
            Arc::clone(&self.api),
            self.session.clone(),
            self.consent_panel(),
        )
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Api {
                code,
                message,
                correlation_id,
                details,
            } => {
                let mut merged = JsonMap::new();
                if let Some(existing) = details {
                    match existing {
                        JsonValue::Object(map) => {
                            for (key, value) in map {
                                merged.insert(key, value);
                            }
                        }
                        value => {
                            merged.insert("info".to_string(), value);
                        }
                    }
                }
                if let Some(id) = correlation_id {
                    merged.insert("correlationId".to_string(), JsonValue::String(id));
                }
                let detail_value = if merged.is_empty() {
                    None
                } else {
                    Some(JsonValue::Object(merged))
                };
                CommandError::new(code.as_str(), message, detail_value)
            }
            AppError::Validation { message } => {
                warn!(target: "app::command", %message, "validation error in command");
                CommandError::new("VALIDATION_ERROR", message, None)
            }
            AppError::Config { message } => CommandError::new("CONFIG_ERROR", message, None),
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "serialization failed", None)
            }
            AppError::Yaml(error) => {
                error!(target: "app::command", error = %error, "yaml error in command");
                CommandError::new("CONFIG_ERROR", format!("invalid configuration file: {error}"), None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "file system access failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}

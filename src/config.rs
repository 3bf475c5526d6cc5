use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use serde::{Deserialize, Serialize};
use crate::error::{AppError, AppResult};
use crate::models::consent::ConsentState;
use crate::models::session::DEFAULT_USER_ID;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_DIRECTIVES: &str = "info,app::api=debug,app::dashboard=info";

const ENV_API_BASE: &str = "DRIVESCORE_API_BASE";
const ENV_HTTP_TIMEOUT: &str = "DRIVESCORE_HTTP_TIMEOUT_SECS";
const ENV_FALLBACK_POLICY: &str = "DRIVESCORE_FALLBACK_POLICY";
const ENV_USER_ID: &str = "DRIVESCORE_USER_ID";
const ENV_LOG_DIR: &str = "DRIVESCORE_LOG_DIR";
const ENV_CONFIG_ENV: &str = "CONFIG_ENV";

/// What the data-access layer does when the backend call fails.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Log a warning and hand back the built-in placeholder data.
    #[default]
    Substitute,
    /// Return the classified error to the caller.
    Propagate,
}

impl TryFrom<&str> for FallbackPolicy {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "substitute" => Ok(FallbackPolicy::Substitute),
            "propagate" => Ok(FallbackPolicy::Propagate),
            other => Err(format!("unsupported fallback policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub directives: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directives: DEFAULT_LOG_DIRECTIVES.to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub fallback_policy: FallbackPolicy,
    pub user_id: String,
    /// Last consent the user is known to have saved. The privacy panel starts
    /// from it instead of the built-in default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_consent: Option<ConsentState>,
    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: 10,
            fallback_policy: FallbackPolicy::Substitute,
            user_id: DEFAULT_USER_ID.to_string(),
            initial_consent: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the YAML file, then environment overrides.
    ///
    /// Without an explicit path, `config/{CONFIG_ENV}.yml` is read when it
    /// exists; a missing default file is not an error.
    pub fn load(explicit_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let env = std::env::var(ENV_CONFIG_ENV).unwrap_or_else(|_| "local".to_string());
                let candidate = PathBuf::from("config").join(format!("{env}.yml"));
                if candidate.exists() {
                    Self::from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.normalize()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> AppResult<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(value) = lookup(ENV_API_BASE) {
            if !value.trim().is_empty() {
                self.api_base_url = value.trim().to_string();
            }
        }

        if let Some(value) = lookup(ENV_HTTP_TIMEOUT) {
            self.http_timeout_secs = value.trim().parse().map_err(|err| {
                AppError::config(format!("{ENV_HTTP_TIMEOUT} must be a whole number: {err}"))
            })?;
        }

        if let Some(value) = lookup(ENV_FALLBACK_POLICY) {
            self.fallback_policy =
                FallbackPolicy::try_from(value.as_str()).map_err(AppError::config)?;
        }

        if let Some(value) = lookup(ENV_USER_ID) {
            if !value.trim().is_empty() {
                self.user_id = value.trim().to_string();
            }
        }

        if let Some(value) = lookup(ENV_LOG_DIR) {
            if !value.trim().is_empty() {
                self.logging.log_dir = Some(PathBuf::from(value.trim()));
            }
        }

        Ok(())
    }

    pub fn normalize(&mut self) -> AppResult<()> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::config("api_base_url must not be empty"));
        }
        self.api_base_url = trimmed.to_string();

        if self.http_timeout_secs == 0 {
            return Err(AppError::config("http_timeout_secs must be positive"));
        }

        if self.user_id.trim().is_empty() {
            return Err(AppError::config("user_id must not be empty"));
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.http_timeout_secs)
    }
}

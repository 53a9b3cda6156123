use std::fmt;
use std::time::Duration;

use config::Environment as EnvironmentSource;
use config::{Config, File};
use serde::Deserialize;

use crate::application::services::JobPollerConfig;
use crate::infrastructure::persistence::DatabaseEndpoint;

use super::Environment;

pub const ENV_PREFIX: &str = "MEDISYNC";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub healthscribe: HealthScribeSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthScribeSettings {
    pub role_arn: String,
    pub output_bucket: String,
    pub region: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,
    #[serde(default = "default_host_timeout_secs")]
    pub host_timeout_secs: u64,
    #[serde(default = "default_status_retry_attempts")]
    pub status_retry_attempts: u32,
}

impl HealthScribeSettings {
    pub fn poller_config(&self) -> JobPollerConfig {
        JobPollerConfig {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            time_budget: Duration::from_secs(self.time_budget_secs),
            status_retry_attempts: self.status_retry_attempts,
            ..JobPollerConfig::default()
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    pub endpoint: String,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DatabaseSettings {
    pub fn parsed_endpoint(&self) -> Result<DatabaseEndpoint, SettingsError> {
        self.endpoint.parse().map_err(SettingsError::Validation)
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Settings {
    /// Layers `appsettings.<environment>.toml` (optional) under
    /// `MEDISYNC_<SECTION>__<KEY>` environment variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(Self::environment_source())
            .build()?;

        Self::from_config(configuration)
    }

    /// `MEDISYNC_<SECTION>__<KEY>` variables. Values stay strings until deserialized,
    /// so secrets such as `007` are kept verbatim.
    pub fn environment_source() -> EnvironmentSource {
        EnvironmentSource::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    pub fn from_config(configuration: Config) -> Result<Self, SettingsError> {
        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let required = [
            ("healthscribe.role_arn", &self.healthscribe.role_arn),
            ("healthscribe.output_bucket", &self.healthscribe.output_bucket),
            ("healthscribe.region", &self.healthscribe.region),
            ("database.endpoint", &self.database.endpoint),
            ("database.user", &self.database.user),
            ("database.password", &self.database.password),
            ("database.name", &self.database.name),
        ];
        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(SettingsError::Validation(format!("{} must not be empty", key)));
        }

        self.database.parsed_endpoint()?;

        if self.healthscribe.time_budget_secs >= self.healthscribe.host_timeout_secs {
            return Err(SettingsError::Validation(format!(
                "healthscribe.time_budget_secs ({}) must be below healthscribe.host_timeout_secs ({})",
                self.healthscribe.time_budget_secs, self.healthscribe.host_timeout_secs
            )));
        }

        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_time_budget_secs() -> u64 {
    840
}

fn default_host_timeout_secs() -> u64 {
    900
}

fn default_status_retry_attempts() -> u32 {
    3
}

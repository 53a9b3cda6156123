mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, ENV_PREFIX, HealthScribeSettings, LoggingSettings, ServerSettings, Settings,
    SettingsError,
};

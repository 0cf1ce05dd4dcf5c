use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Production,
    Development,
    Local,
    #[default]
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Environment {
    /// Reads `APP_ENVIRONMENT`, falling back to [`Environment::Test`] when it is
    /// unset or unknown.
    pub fn from_env() -> Self {
        std::env::var("APP_ENVIRONMENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Base name of the config file for this environment, e.g. `config/local`.
    pub fn config_file(&self) -> String {
        format!("config/{}", self.as_ref())
    }
}

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

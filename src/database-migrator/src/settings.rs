use config::{Config, ConfigError, File};
use postgres::PsqlSettings;
use serde::Deserialize;
use weather_core::{Environment, LogLevel};

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_level: LogLevel,
    pub postgres: PsqlSettings,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let environment = Environment::from_env();

        Config::builder()
            .add_source(File::with_name(&environment.config_file()).required(true))
            .add_source(
                File::with_name(&format!("{}.secret", environment.config_file()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("WEATHER_DATABASE_MIGRATOR").separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

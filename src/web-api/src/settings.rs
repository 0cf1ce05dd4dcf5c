use config::{Config, ConfigError, File};
use postgres::PsqlSettings;
use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};
use weather_core::{Environment, LogLevel};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub api: ApiSettings,
    pub postgres: PsqlSettings,
    pub openweather: openweather::Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub ip: String,
    pub port: u16,
    pub num_workers: Option<u32>,
    /// Allows any origin in production too. Always on in other environments.
    #[serde(default)]
    pub permissive_cors: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let file = environment.config_file();

        Config::builder()
            .add_source(File::with_name(&file).required(true))
            .add_source(File::with_name(&format!("{file}.secret")).required(false))
            .add_source(config::Environment::with_prefix("WEATHER_API").separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }

    /// Installs the global `fmt` subscriber. `RUST_LOG` takes precedence over
    /// the configured log level.
    pub fn init_tracer(&self) {
        let level = Level::from(self.log_level);
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

        fmt().with_env_filter(filter).with_target(true).init();
    }

    pub fn cors_permissive(&self) -> bool {
        self.environment != Environment::Production || self.api.permissive_cors
    }

    pub fn serve_api_doc(&self) -> bool {
        self.environment != Environment::Production
    }
}

impl ApiSettings {
    pub fn listener_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

use std::fmt;

use serde::Deserialize;

fn default_max_connections() -> u32 {
    5
}

#[derive(Clone, Deserialize)]
pub struct PsqlSettings {
    /// A `postgres://` connection string.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub log_statements: bool,
    #[serde(default)]
    pub run_migrations: bool,
}

impl fmt::Debug for PsqlSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PsqlSettings")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("log_statements", &self.log_statements)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

#![deny(warnings)]
#![deny(rust_2018_idioms)]

use postgres::PostgresAdapter;
use snafu::{ResultExt, Snafu};
use tracing::Level;

mod settings;

use settings::Settings;

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("Failed to load settings"))]
    Settings { source: config::ConfigError },
    #[snafu(display("Failed to migrate the database"))]
    Postgres { source: postgres::Error },
}

#[snafu::report]
#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = Settings::new().context(SettingsSnafu)?;

    tracing_subscriber::fmt()
        .with_max_level(Level::from(settings.log_level))
        .init();

    PostgresAdapter::new(&settings.postgres)
        .await
        .context(PostgresSnafu)?
        .do_migrations()
        .await
        .context(PostgresSnafu)?;

    Ok(())
}

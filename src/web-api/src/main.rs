#![deny(warnings)]
#![deny(rust_2018_idioms)]

use snafu::ResultExt;
use web_api::{
    settings::Settings,
    startup::{
        startup_error::{RunSnafu, SettingsSnafu},
        App, StartupError,
    },
};

#[snafu::report]
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let settings = Settings::new().context(SettingsSnafu)?;
    settings.init_tracer();

    let app = App::build(&settings).await?;

    app.run().await.context(RunSnafu)
}

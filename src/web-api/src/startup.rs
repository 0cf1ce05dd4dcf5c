use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    middleware::{Compress, Condition},
    web::{self, Data},
    HttpServer,
};
use openweather::OpenWeatherClient;
use postgres::PostgresAdapter;
use snafu::{Location, ResultExt, Snafu};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{error::json_error_handler, frontend, routes, settings::Settings, Database};

use self::startup_error::{BindSnafu, OpenWeatherSnafu, PostgresSnafu};

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum StartupError {
    #[snafu(display("Failed to load settings"))]
    Settings {
        #[snafu(implicit)]
        location: Location,
        source: config::ConfigError,
    },
    #[snafu(display("Failed to bind to '{address}'"))]
    Bind {
        #[snafu(implicit)]
        location: Location,
        address: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to set up the database"))]
    Postgres {
        #[snafu(implicit)]
        location: Location,
        source: postgres::Error,
    },
    #[snafu(display("Failed to create the OpenWeather client"))]
    OpenWeather {
        #[snafu(implicit)]
        location: Location,
        source: openweather::Error,
    },
    #[snafu(display("Server terminated with an error"))]
    Run {
        #[snafu(implicit)]
        location: Location,
        source: std::io::Error,
    },
}

pub struct App {
    server: Server,
    port: u16,
}

impl App {
    pub async fn build(settings: &Settings) -> Result<Self, StartupError> {
        let postgres = PostgresAdapter::new(&settings.postgres)
            .await
            .context(PostgresSnafu)?;

        if settings.postgres.run_migrations {
            postgres.do_migrations().await.context(PostgresSnafu)?;
        }

        Self::with_database(settings, postgres)
    }

    /// Builds the server on top of any storage implementing the ports.
    pub fn with_database<T: Database>(settings: &Settings, database: T) -> Result<Self, StartupError> {
        let address = settings.api.listener_address();
        let listener = TcpListener::bind(&address).with_context(|_| BindSnafu {
            address: address.clone(),
        })?;
        let port = listener
            .local_addr()
            .with_context(|_| BindSnafu {
                address: address.clone(),
            })?
            .port();

        let client = OpenWeatherClient::new(&settings.openweather).context(OpenWeatherSnafu)?;
        let server = create_server(database, client, listener, settings)
            .context(BindSnafu { address })?;

        info!(port, environment = %settings.environment, "web api listening");

        Ok(App { server, port })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        self.server.await
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

fn create_server<T: Database>(
    database: T,
    client: OpenWeatherClient,
    listener: TcpListener,
    settings: &Settings,
) -> Result<Server, std::io::Error> {
    let permissive_cors = settings.cors_permissive();
    let serve_api_doc = settings.serve_api_doc();

    let mut server = HttpServer::new(move || {
        let app = actix_web::App::new()
            .app_data(Data::new(database.clone()))
            .app_data(Data::new(client.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Compress::default())
            .wrap(Condition::new(permissive_cors, Cors::permissive()))
            .wrap(TracingLogger::default())
            .service(routes::weather_scope::<T>())
            .route("/", web::get().to(frontend::index))
            .route("/app.js", web::get().to(frontend::app_js));

        if serve_api_doc {
            app.route("/api-doc/openapi.json", web::get().to(routes::api_doc))
        } else {
            app
        }
    })
    .listen(listener)?;

    if let Some(workers) = settings.api.num_workers {
        server = server.workers(workers as usize);
    }

    Ok(server.run())
}

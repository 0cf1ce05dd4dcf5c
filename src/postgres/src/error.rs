use std::panic::Location as StdLocation;

use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to connect to the database"))]
    Connection {
        #[snafu(implicit)]
        location: Location,
        source: sqlx::Error,
    },
    #[snafu(display("A database query failed"))]
    Query {
        #[snafu(implicit)]
        location: Location,
        source: sqlx::Error,
    },
    #[snafu(display("Failed to run database migrations"))]
    Migration {
        #[snafu(implicit)]
        location: Location,
        source: sqlx::migrate::MigrateError,
    },
    #[snafu(display("Failed to convert temperatures of record '{id}'"))]
    Conversion {
        #[snafu(implicit)]
        location: Location,
        id: uuid::Uuid,
        source: serde_json::Error,
    },
}

impl From<sqlx::Error> for Error {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = StdLocation::caller();
        Error::Query {
            location: Location::new(location.file(), location.line(), location.column()),
            source,
        }
    }
}

impl From<Error> for weather_core::Error {
    #[track_caller]
    fn from(value: Error) -> Self {
        let location = StdLocation::caller();
        weather_core::Error::Storage {
            location: Location::new(location.file(), location.line(), location.column()),
            source: Box::new(value),
        }
    }
}

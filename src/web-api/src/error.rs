use std::panic::Location as CallerLocation;

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use snafu::{Location, Report, Snafu};
use strum::Display;
use tracing::error;
use utoipa::ToSchema;
use weather_core::{DateRangeError, ExportError, UpdateError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("{field} is required"))]
    MissingField {
        #[snafu(implicit)]
        location: Location,
        field: &'static str,
    },
    #[snafu(display("Invalid request body: {message}"))]
    InvalidBody {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
    #[snafu(display("{source}"))]
    DateRange {
        #[snafu(implicit)]
        location: Location,
        source: DateRangeError,
    },
    #[snafu(display("Location '{query}' not found"))]
    LocationNotFound {
        #[snafu(implicit)]
        location: Location,
        query: String,
    },
    #[snafu(display("No forecast data available for selected dates ({start} to {end})."))]
    NoForecastForRange {
        #[snafu(implicit)]
        location: Location,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[snafu(display("Record not found"))]
    NotFound {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Unsupported format '{format}'"))]
    UnsupportedFormat {
        #[snafu(implicit)]
        location: Location,
        format: String,
    },
    #[snafu(display("Type at least 2 letters"))]
    QueryTooShort {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("{source}"))]
    Upstream {
        #[snafu(implicit)]
        location: Location,
        source: openweather::Error,
    },
    #[snafu(display("{source}"))]
    Database {
        #[snafu(implicit)]
        location: Location,
        source: weather_core::Error,
    },
    #[snafu(display("{source}"))]
    Export {
        #[snafu(implicit)]
        location: Location,
        source: ExportError,
    },
}

/// Machine readable error class included in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
pub enum ErrorKind {
    MissingField,
    InvalidBody,
    InvalidDate,
    InvalidRange,
    RangeTooLong,
    LocationNotFound,
    NoForecastForRange,
    NotFound,
    UnsupportedFormat,
    QueryTooShort,
    UpstreamFailure,
    InternalServerError,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField { .. } => ErrorKind::MissingField,
            Error::InvalidBody { .. } => ErrorKind::InvalidBody,
            Error::DateRange { source, .. } => match source {
                DateRangeError::InvalidDate { .. } => ErrorKind::InvalidDate,
                DateRangeError::InvalidRange { .. } => ErrorKind::InvalidRange,
                DateRangeError::RangeTooLong { .. } => ErrorKind::RangeTooLong,
            },
            Error::LocationNotFound { .. } => ErrorKind::LocationNotFound,
            Error::NoForecastForRange { .. } => ErrorKind::NoForecastForRange,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Error::QueryTooShort { .. } => ErrorKind::QueryTooShort,
            Error::Upstream { .. } => ErrorKind::UpstreamFailure,
            Error::Database { .. } | Error::Export { .. } => ErrorKind::InternalServerError,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MissingField
            | ErrorKind::InvalidBody
            | ErrorKind::InvalidDate
            | ErrorKind::InvalidRange
            | ErrorKind::RangeTooLong
            | ErrorKind::LocationNotFound
            | ErrorKind::NoForecastForRange
            | ErrorKind::UnsupportedFormat
            | ErrorKind::QueryTooShort => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::UpstreamFailure | ErrorKind::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", Report::from_error(self));
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        })
    }
}

#[track_caller]
fn caller() -> Location {
    let location = CallerLocation::caller();
    Location::new(location.file(), location.line(), location.column())
}

impl From<DateRangeError> for Error {
    #[track_caller]
    fn from(source: DateRangeError) -> Self {
        Error::DateRange {
            location: caller(),
            source,
        }
    }
}

impl From<UpdateError> for Error {
    #[track_caller]
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Dates { source, .. } => Error::DateRange {
                location: caller(),
                source,
            },
            UpdateError::MissingTemperature { .. } => Error::MissingField {
                location: caller(),
                field: "temp",
            },
        }
    }
}

impl From<openweather::Error> for Error {
    #[track_caller]
    fn from(value: openweather::Error) -> Self {
        match value {
            openweather::Error::LocationNotFound { query, .. } => Error::LocationNotFound {
                location: caller(),
                query,
            },
            openweather::Error::EmptyQuery { .. } => Error::QueryTooShort { location: caller() },
            source => Error::Upstream {
                location: caller(),
                source,
            },
        }
    }
}

impl From<weather_core::Error> for Error {
    #[track_caller]
    fn from(source: weather_core::Error) -> Self {
        Error::Database {
            location: caller(),
            source,
        }
    }
}

impl From<ExportError> for Error {
    #[track_caller]
    fn from(value: ExportError) -> Self {
        match value {
            ExportError::UnsupportedFormat { format, .. } => Error::UnsupportedFormat {
                location: caller(),
                format,
            },
            source => Error::Export {
                location: caller(),
                source,
            },
        }
    }
}

/// Turns body deserialization failures into our error format.
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::InvalidBody {
        location: caller(),
        message: error.to_string(),
    }
    .into()
}

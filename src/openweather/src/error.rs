use reqwest::StatusCode;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("An OpenWeather api key must be configured"))]
    MissingApiKey {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to build HTTP client"))]
    BuildClient {
        #[snafu(implicit)]
        location: Location,
        source: reqwest::Error,
    },
    #[snafu(display("HTTP request to '{url}' failed"))]
    Request {
        #[snafu(implicit)]
        location: Location,
        url: String,
        source: reqwest_middleware::Error,
    },
    #[snafu(display("HTTP request failed, status: '{status}', url: '{url}', body: '{body}'"))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("Failed to decode response from '{url}'"))]
    Decode {
        #[snafu(implicit)]
        location: Location,
        url: String,
        source: reqwest::Error,
    },
    #[snafu(display("Invalid forecast timestamp '{value}'"))]
    InvalidTimestamp {
        #[snafu(implicit)]
        location: Location,
        value: String,
        source: chrono::ParseError,
    },
    #[snafu(display("No location matched '{query}'"))]
    LocationNotFound {
        #[snafu(implicit)]
        location: Location,
        query: String,
    },
    #[snafu(display("Query must be at least 2 characters, got '{query}'"))]
    EmptyQuery {
        #[snafu(implicit)]
        location: Location,
        query: String,
    },
    #[snafu(display("Current weather at ({lat}, {lon}) had no condition"))]
    MissingCondition {
        #[snafu(implicit)]
        location: Location,
        lat: f64,
        lon: f64,
    },
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::FailedRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}

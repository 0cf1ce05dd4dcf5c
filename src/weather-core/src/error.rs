use chrono::NaiveDate;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by storage adapters behind the ports.
#[derive(Debug, Snafu)]
#[snafu(module(storage_error), visibility(pub))]
pub enum Error {
    #[snafu(display("Storage operation failed: {source}"))]
    Storage {
        #[snafu(implicit)]
        location: Location,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum DateRangeError {
    #[snafu(display("Invalid date format '{value}'. Use YYYY-MM-DD."))]
    InvalidDate {
        #[snafu(implicit)]
        location: Location,
        value: String,
    },
    #[snafu(display("Start date '{start}' must be before end date '{end}'."))]
    InvalidRange {
        #[snafu(implicit)]
        location: Location,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[snafu(display(
        "Date range must be between 1 and 5 days, '{start}' to '{end}' spans {days} days."
    ))]
    RangeTooLong {
        #[snafu(implicit)]
        location: Location,
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum UpdateError {
    #[snafu(display("{source}"))]
    Dates {
        #[snafu(implicit)]
        location: Location,
        source: DateRangeError,
    },
    #[snafu(display("temp is required when the record has no temperature entries"))]
    MissingTemperature {
        #[snafu(implicit)]
        location: Location,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ExportError {
    #[snafu(display("Unsupported format '{format}'"))]
    UnsupportedFormat {
        #[snafu(implicit)]
        location: Location,
        format: String,
    },
    #[snafu(display("Failed to serialize json export"))]
    Json {
        #[snafu(implicit)]
        location: Location,
        source: serde_json::Error,
    },
    #[snafu(display("Failed to write csv export"))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        source: csv::Error,
    },
    #[snafu(display("Failed to flush csv export"))]
    CsvFlush {
        #[snafu(implicit)]
        location: Location,
        source: std::io::Error,
    },
    #[snafu(display("Csv export was not valid utf-8"))]
    Utf8 {
        #[snafu(implicit)]
        location: Location,
        source: std::string::FromUtf8Error,
    },
}

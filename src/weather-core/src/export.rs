use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use snafu::ResultExt;
use strum::{AsRefStr, Display, EnumString};

use crate::{
    export_error::{CsvFlushSnafu, CsvSnafu, JsonSnafu, UnsupportedFormatSnafu, Utf8Snafu},
    ExportError, WeatherRequest, WeatherRequestId,
};

pub static CSV_HEADER: [&str; 9] = [
    "id",
    "locationInput",
    "normalizedLocation",
    "startDate",
    "endDate",
    "temp",
    "description",
    "mapsUrl",
    "createdAt",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    #[strum(serialize = "md")]
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub content_type: &'static str,
    pub filename: &'static str,
    pub payload: String,
}

/// Export projection of a record built from its first temperature entry only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatView {
    pub id: WeatherRequestId,
    pub location_input: String,
    pub normalized_location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub temp: Option<f64>,
    pub description: String,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub maps_url: String,
    pub created_at: DateTime<Utc>,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Result<Self, ExportError> {
        value
            .parse()
            .map_err(|_| UnsupportedFormatSnafu { format: value }.build())
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Markdown => "text/markdown",
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Json => "weather.json",
            ExportFormat::Csv => "weather.csv",
            ExportFormat::Markdown => "weather.md",
        }
    }
}

impl From<&WeatherRequest> for FlatView {
    fn from(v: &WeatherRequest) -> Self {
        let first = v.first_temperature();

        Self {
            id: v.id,
            location_input: v.location_input.clone(),
            normalized_location: v.normalized_location.clone(),
            start_date: v.start_date,
            end_date: v.end_date,
            temp: first.map(|t| t.temp),
            description: first
                .and_then(|t| t.description.clone())
                .unwrap_or_default(),
            humidity: first.and_then(|t| t.humidity),
            wind_speed: first.and_then(|t| t.wind_speed),
            maps_url: v.maps_url.clone(),
            created_at: v.created_at,
        }
    }
}

pub fn export(format: ExportFormat, records: &[WeatherRequest]) -> Result<Export, ExportError> {
    let views = records.iter().map(FlatView::from).collect::<Vec<_>>();

    let payload = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&views).context(JsonSnafu)?,
        ExportFormat::Csv => to_csv(&views)?,
        ExportFormat::Markdown => to_markdown(&views),
    };

    Ok(Export {
        content_type: format.content_type(),
        filename: format.filename(),
        payload,
    })
}

// Fields are written verbatim and only the description is wrapped in quotes,
// embedded quotes or commas are not escaped.
fn to_csv(views: &[FlatView]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).context(CsvSnafu)?;

    for v in views {
        writer
            .write_record([
                v.id.to_string(),
                v.location_input.clone(),
                v.normalized_location.clone(),
                iso_timestamp(v.start_date),
                iso_timestamp(v.end_date),
                v.temp.map(|t| t.to_string()).unwrap_or_default(),
                format!("\"{}\"", v.description),
                v.maps_url.clone(),
                v.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ])
            .context(CsvSnafu)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context(CsvFlushSnafu)?;

    String::from_utf8(bytes).context(Utf8Snafu)
}

fn to_markdown(views: &[FlatView]) -> String {
    views
        .iter()
        .map(|v| {
            let temp = v
                .temp
                .map(|t| t.to_string())
                .unwrap_or_else(|| "n/a".into());

            format!(
                "- **{}** ({} → {}): {temp}°C, {} [Maps]({})",
                v.normalized_location, v.start_date, v.end_date, v.description, v.maps_url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn iso_timestamp(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

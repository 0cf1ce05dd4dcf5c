use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;
use snafu::ResultExt;
use weather_core::ForecastDay;

use crate::{error::error::InvalidTimestampSnafu, Result};

static FORECAST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodedLocation {
    pub name: String,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

/// One three-hourly reading of the 5-day forecast.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt_txt: String,
    pub main: Main,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Option<Wind>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub main: Main,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Option<Wind>,
    pub sys: Option<Sys>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Main {
    pub temp: f64,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub country: Option<String>,
}

impl GeocodedLocation {
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.country.as_deref())
    }
}

impl CurrentResponse {
    pub fn location_name(&self) -> String {
        display_name(
            &self.name,
            self.sys.as_ref().and_then(|s| s.country.as_deref()),
        )
    }
}

impl ForecastEntry {
    /// Returns the entry as a daily reading if it is sampled at noon.
    pub fn noon_reading(&self) -> Result<Option<ForecastDay>> {
        let timestamp = NaiveDateTime::parse_from_str(&self.dt_txt, FORECAST_TIMESTAMP_FORMAT)
            .with_context(|_| InvalidTimestampSnafu {
                value: self.dt_txt.clone(),
            })?;

        if !is_noon(&timestamp) {
            return Ok(None);
        }

        Ok(Some(ForecastDay {
            date: timestamp.date(),
            temp: self.main.temp,
            description: self.weather.first().map(|c| c.description.clone()),
            humidity: self.main.humidity,
            wind_speed: self.wind.as_ref().map(|w| w.speed),
        }))
    }
}

fn is_noon(timestamp: &NaiveDateTime) -> bool {
    timestamp.hour() == 12 && timestamp.minute() == 0 && timestamp.second() == 0
}

fn display_name(name: &str, country: Option<&str>) -> String {
    match country {
        Some(country) if !country.is_empty() => format!("{name}, {country}"),
        _ => name.to_string(),
    }
}

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use url::form_urlencoded;
use uuid::Uuid;

use crate::{
    update_error::{DatesSnafu, MissingTemperatureSnafu},
    DateRange, Forecast, ForecastDay, UpdateError,
};

pub static MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherRequestId(Uuid);

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureEntry {
    pub date: NaiveDate,
    pub temp: f64,
    pub description: Option<String>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRequest {
    pub id: WeatherRequestId,
    pub location_input: String,
    pub normalized_location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub temperatures: Vec<TemperatureEntry>,
    /// Derived from `normalized_location`, recomputed whenever the location is
    /// updated.
    pub maps_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record ready to be persisted. Identity and timestamps are assigned by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeatherRequest {
    pub location_input: String,
    pub normalized_location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub temperatures: Vec<TemperatureEntry>,
    pub maps_url: String,
}

/// Client supplied changes, already parsed. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateWeatherRequest {
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub temp: Option<f64>,
    pub description: Option<String>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl WeatherRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for WeatherRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for WeatherRequestId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl AsRef<Uuid> for WeatherRequestId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for WeatherRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for WeatherRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<ForecastDay> for TemperatureEntry {
    fn from(v: ForecastDay) -> Self {
        let ForecastDay {
            date,
            temp,
            description,
            humidity,
            wind_speed,
        } = v;

        Self {
            date,
            temp,
            description,
            humidity,
            wind_speed,
        }
    }
}

impl NewWeatherRequest {
    /// Keeps only the forecast days inside `range`. Returns `None` when no day
    /// matches, a record is never created without temperatures.
    pub fn new(location_input: String, range: DateRange, forecast: Forecast) -> Option<Self> {
        let temperatures = forecast
            .days_within(&range)
            .into_iter()
            .map(TemperatureEntry::from)
            .collect::<Vec<_>>();

        if temperatures.is_empty() {
            return None;
        }

        Some(Self {
            location_input,
            maps_url: maps_url(&forecast.normalized_location),
            normalized_location: forecast.normalized_location,
            lat: Some(forecast.lat),
            lon: Some(forecast.lon),
            start_date: range.start(),
            end_date: range.end(),
            temperatures,
        })
    }
}

impl WeatherRequest {
    pub fn first_temperature(&self) -> Option<&TemperatureEntry> {
        self.temperatures.first()
    }

    /// Applies `update` in place.
    ///
    /// Dates are re-validated as a pair, falling back to the stored value for
    /// the one not supplied. A new location replaces both the raw and the
    /// normalized location without geocoding. Weather values only ever touch
    /// the first temperature entry.
    pub fn apply_update(&mut self, update: UpdateWeatherRequest) -> Result<(), UpdateError> {
        let UpdateWeatherRequest {
            location,
            start_date,
            end_date,
            temp,
            description,
            humidity,
            wind_speed,
        } = update;

        if start_date.is_some() || end_date.is_some() {
            let range = DateRange::new(
                start_date.unwrap_or(self.start_date),
                end_date.unwrap_or(self.end_date),
            )
            .context(DatesSnafu)?;

            self.start_date = range.start();
            self.end_date = range.end();
        }

        if let Some(location) = location {
            self.maps_url = maps_url(&location);
            self.normalized_location = location.clone();
            self.location_input = location;
        }

        if self.temperatures.is_empty() {
            self.temperatures.push(TemperatureEntry {
                date: self.start_date,
                temp: temp.context(MissingTemperatureSnafu)?,
                description: None,
                humidity: None,
                wind_speed: None,
            });
        }

        let first = &mut self.temperatures[0];
        if let Some(temp) = temp {
            first.temp = temp;
        }
        if description.is_some() {
            first.description = description;
        }
        if humidity.is_some() {
            first.humidity = humidity;
        }
        if wind_speed.is_some() {
            first.wind_speed = wind_speed;
        }

        Ok(())
    }
}

pub fn maps_url(location: &str) -> String {
    let query = form_urlencoded::byte_serialize(location.as_bytes()).collect::<String>();
    format!("{MAPS_SEARCH_URL}?api=1&query={query}")
}

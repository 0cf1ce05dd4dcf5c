use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use uuid::Uuid;
use weather_core::TemperatureEntry;

use crate::error::{error::ConversionSnafu, Error};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeatherRequest {
    pub id: Uuid,
    pub location_input: String,
    pub normalized_location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub temperatures: serde_json::Value,
    pub maps_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shape of a single element of the `temperatures` JSONB column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub date: NaiveDate,
    pub temp: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

impl From<&TemperatureEntry> for Temperature {
    fn from(v: &TemperatureEntry) -> Self {
        Self {
            date: v.date,
            temp: v.temp,
            description: v.description.clone(),
            humidity: v.humidity,
            wind_speed: v.wind_speed,
        }
    }
}

impl From<Temperature> for TemperatureEntry {
    fn from(v: Temperature) -> Self {
        let Temperature {
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

pub fn temperatures_json(entries: &[TemperatureEntry]) -> sqlx::types::Json<Vec<Temperature>> {
    sqlx::types::Json(entries.iter().map(Temperature::from).collect())
}

impl TryFrom<WeatherRequest> for weather_core::WeatherRequest {
    type Error = Error;

    fn try_from(v: WeatherRequest) -> Result<Self, Self::Error> {
        let temperatures: Vec<Temperature> =
            serde_json::from_value(v.temperatures).context(ConversionSnafu { id: v.id })?;

        Ok(Self {
            id: v.id.into(),
            location_input: v.location_input,
            normalized_location: v.normalized_location,
            lat: v.lat,
            lon: v.lon,
            start_date: v.start_date,
            end_date: v.end_date,
            temperatures: temperatures.into_iter().map(TemperatureEntry::from).collect(),
            maps_url: v.maps_url,
            created_at: v.created_at,
            updated_at: v.updated_at,
        })
    }
}

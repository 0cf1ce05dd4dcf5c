use chrono::NaiveDate;

use crate::DateRange;

/// One representative forecast reading for a calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp: f64,
    pub description: Option<String>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// A geocoded location together with its upcoming days, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub normalized_location: String,
    pub lat: f64,
    pub lon: f64,
    pub days: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temp: f64,
    pub description: String,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub location_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSuggestion {
    pub name: String,
}

impl Forecast {
    pub fn days_within(&self, range: &DateRange) -> Vec<ForecastDay> {
        self.days
            .iter()
            .filter(|d| range.contains(d.date))
            .cloned()
            .collect()
    }
}

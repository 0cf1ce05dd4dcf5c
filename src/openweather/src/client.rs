use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use snafu::{OptionExt, ResultExt};
use tracing::{debug, instrument};
use weather_core::{CurrentConditions, Forecast, LocationSuggestion};

use crate::{
    error::error::{
        BuildClientSnafu, DecodeSnafu, EmptyQuerySnafu, FailedRequestSnafu, LocationNotFoundSnafu,
        MissingApiKeySnafu, MissingConditionSnafu, RequestSnafu,
    },
    models::{CurrentResponse, ForecastResponse, GeocodedLocation},
    Result, Settings,
};

pub const MAX_SUGGESTIONS: u8 = 5;
pub const MIN_QUERY_LENGTH: usize = 2;

/// Client for the OpenWeather geocoding, forecast and current weather APIs.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: ClientWithMiddleware,
    api_key: String,
    geocoding_url: String,
    data_url: String,
}

impl OpenWeatherClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_key = settings.api_key.trim();
        if api_key.is_empty() {
            return MissingApiKeySnafu.fail();
        }

        let mut builder = Client::builder().gzip(true);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let inner = builder.build().context(BuildClientSnafu)?;
        let http = ClientBuilder::new(inner)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            geocoding_url: settings.geocoding_url.trim_end_matches('/').to_string(),
            data_url: settings.data_url.trim_end_matches('/').to_string(),
        })
    }

    /// Geocodes `location` and returns its noon readings for the coming days.
    #[instrument(skip(self))]
    pub async fn five_day_forecast(&self, location: &str) -> Result<Forecast> {
        let place = self
            .geocode(location, 1)
            .await?
            .into_iter()
            .next()
            .context(LocationNotFoundSnafu { query: location })?;

        let url = format!("{}/forecast", self.data_url);
        let response: ForecastResponse = self
            .get(
                url,
                &[
                    ("lat", place.lat.to_string()),
                    ("lon", place.lon.to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        let days = response
            .list
            .iter()
            .filter_map(|e| e.noon_reading().transpose())
            .collect::<Result<Vec<_>>>()?;

        debug!(
            entries = response.list.len(),
            days = days.len(),
            "sampled forecast"
        );

        Ok(Forecast {
            normalized_location: place.display_name(),
            lat: place.lat,
            lon: place.lon,
            days,
        })
    }

    #[instrument(skip(self))]
    pub async fn suggestions(&self, query: &str) -> Result<Vec<LocationSuggestion>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return EmptyQuerySnafu { query }.fail();
        }

        Ok(self
            .geocode(query, MAX_SUGGESTIONS)
            .await?
            .into_iter()
            .map(|l| LocationSuggestion {
                name: l.display_name(),
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn current_conditions(&self, lat: f64, lon: f64) -> Result<CurrentConditions> {
        let url = format!("{}/weather", self.data_url);
        let response: CurrentResponse = self
            .get(
                url,
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        let description = response
            .weather
            .first()
            .map(|c| c.description.clone())
            .context(MissingConditionSnafu { lat, lon })?;

        Ok(CurrentConditions {
            location_name: response.location_name(),
            temp: response.main.temp,
            description,
            humidity: response.main.humidity,
            wind_speed: response.wind.as_ref().map(|w| w.speed),
        })
    }

    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeocodedLocation>> {
        let url = format!("{}/direct", self.geocoding_url);
        self.get(
            url,
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    // `url` never carries the query string, so it is safe to put in errors.
    // The url reqwest attaches to its own errors does, and carries the api key.
    async fn get<T: DeserializeOwned>(&self, url: String, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", &self.api_key)])
            .send()
            .await
            .map_err(without_url)
            .with_context(|_| RequestSnafu { url: url.clone() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return FailedRequestSnafu { url, status, body }.fail();
        }

        response.json().await.context(DecodeSnafu { url })
    }
}

fn without_url(error: reqwest_middleware::Error) -> reqwest_middleware::Error {
    use reqwest_middleware::Error;

    match error {
        Error::Reqwest(e) => Error::Reqwest(e.without_url()),
        e @ Error::Middleware(_) => e,
    }
}

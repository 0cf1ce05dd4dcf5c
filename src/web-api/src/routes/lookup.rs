use actix_web::web;
use openweather::OpenWeatherClient;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use snafu::OptionExt;
use utoipa::{IntoParams, ToSchema};
use weather_core::{CurrentConditions, LocationSuggestion};

use crate::{
    error::{error::MissingFieldSnafu, ErrorResponse, Result},
    response::Response,
    routes::utils::deserialize_optional_number,
};

#[utoipa::path(
    get,
    path = "/api/weather/suggest",
    params(SuggestParams),
    responses(
        (status = 200, description = "up to five matching place names", body = [Suggestion]),
        (status = 400, description = "query shorter than two characters", body = ErrorResponse),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(client))]
pub async fn suggestions(
    client: web::Data<OpenWeatherClient>,
    params: web::Query<SuggestParams>,
) -> Result<Response<Vec<Suggestion>>> {
    let suggestions = client
        .suggestions(&params.q)
        .await?
        .into_iter()
        .map(Suggestion::from)
        .collect();

    Ok(Response::new(suggestions))
}

#[utoipa::path(
    post,
    path = "/api/weather/current",
    request_body = CurrentLocation,
    responses(
        (status = 200, description = "current conditions at the coordinates", body = CurrentWeather),
        (status = 400, description = "missing coordinates", body = ErrorResponse),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(client))]
pub async fn current_weather(
    client: web::Data<OpenWeatherClient>,
    body: web::Json<CurrentLocation>,
) -> Result<Response<CurrentWeather>> {
    let CurrentLocation { lat, lon } = body.into_inner();
    let lat = lat.context(MissingFieldSnafu { field: "lat" })?;
    let lon = lon.context(MissingFieldSnafu { field: "lon" })?;

    let current = client.current_conditions(lat, lon).await?;
    Ok(Response::new(current.into()))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestParams {
    /// Partial place name, at least two characters.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Suggestion {
    pub name: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct CurrentLocation {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temp: f64,
    pub description: String,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub location_name: String,
}

impl From<LocationSuggestion> for Suggestion {
    fn from(v: LocationSuggestion) -> Self {
        Self { name: v.name }
    }
}

impl From<CurrentConditions> for CurrentWeather {
    fn from(v: CurrentConditions) -> Self {
        let CurrentConditions {
            temp,
            description,
            humidity,
            wind_speed,
            location_name,
        } = v;

        Self {
            temp,
            description,
            humidity,
            wind_speed,
            location_name,
        }
    }
}

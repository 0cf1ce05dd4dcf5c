use actix_web::web;
use chrono::{DateTime, NaiveDate, Utc};
use openweather::OpenWeatherClient;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use snafu::OptionExt;
use utoipa::ToSchema;
use uuid::Uuid;
use weather_core::{
    parse_date, DateRange, NewWeatherRequest, TemperatureEntry, WeatherRequestId,
    WeatherRequestInbound, WeatherRequestOutbound,
};

use crate::{
    error::{
        error::{MissingFieldSnafu, NoForecastForRangeSnafu, NotFoundSnafu},
        ErrorResponse, Result,
    },
    response::Response,
    routes::utils::{deserialize_optional_number, non_empty},
    Database,
};

pub static UPDATED_MESSAGE: &str = "Record updated successfully!";
pub static DELETED_MESSAGE: &str = "Record deleted successfully";

#[utoipa::path(
    post,
    path = "/api/weather",
    request_body = CreateWeatherRequest,
    responses(
        (status = 201, description = "the persisted record", body = WeatherRequest),
        (status = 400, description = "missing field, invalid dates or no forecast for the range", body = ErrorResponse),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db, client))]
pub async fn create_weather_request<T: Database>(
    db: web::Data<T>,
    client: web::Data<OpenWeatherClient>,
    body: web::Json<CreateWeatherRequest>,
) -> Result<Response<WeatherRequest>> {
    let CreateWeatherRequest {
        location,
        start_date,
        end_date,
    } = body.into_inner();

    let location = non_empty(location).context(MissingFieldSnafu { field: "location" })?;
    let start_date = non_empty(start_date).context(MissingFieldSnafu { field: "startDate" })?;
    let end_date = non_empty(end_date).context(MissingFieldSnafu { field: "endDate" })?;

    let range = DateRange::parse(&start_date, &end_date)?;
    let forecast = client.five_day_forecast(&location).await?;

    let request = NewWeatherRequest::new(location, range, forecast).context(
        NoForecastForRangeSnafu {
            start: range.start(),
            end: range.end(),
        },
    )?;

    let record = db.add_weather_request(request).await?;
    Ok(Response::created(record.into()))
}

#[utoipa::path(
    get,
    path = "/api/weather",
    responses(
        (status = 200, description = "all records, newest first", body = [WeatherRequest]),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn weather_requests<T: Database>(
    db: web::Data<T>,
) -> Result<Response<Vec<WeatherRequest>>> {
    let records = db
        .weather_requests()
        .await?
        .into_iter()
        .map(WeatherRequest::from)
        .collect();

    Ok(Response::new(records))
}

#[utoipa::path(
    get,
    path = "/api/weather/{id}",
    params(("id" = Uuid, Path, description = "record id")),
    responses(
        (status = 200, description = "the record", body = WeatherRequest),
        (status = 404, description = "no such record", body = ErrorResponse),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn weather_request<T: Database>(
    db: web::Data<T>,
    id: web::Path<String>,
) -> Result<Response<WeatherRequest>> {
    let id = parse_id(&id)?;
    let record = db.weather_request(id).await?.context(NotFoundSnafu)?;

    Ok(Response::new(record.into()))
}

#[utoipa::path(
    put,
    path = "/api/weather/{id}",
    params(("id" = Uuid, Path, description = "record id")),
    request_body = UpdateWeatherRequest,
    responses(
        (status = 200, description = "the updated record", body = UpdatedWeatherRequest),
        (status = 400, description = "invalid dates or body", body = ErrorResponse),
        (status = 404, description = "no such record", body = ErrorResponse),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn update_weather_request<T: Database>(
    db: web::Data<T>,
    id: web::Path<String>,
    body: web::Json<UpdateWeatherRequest>,
) -> Result<Response<UpdatedWeatherRequest>> {
    let id = parse_id(&id)?;
    let mut record = db.weather_request(id).await?.context(NotFoundSnafu)?;

    record.apply_update(body.into_inner().try_into()?)?;

    let record = db
        .update_weather_request(&record)
        .await?
        .context(NotFoundSnafu)?;

    Ok(Response::new(UpdatedWeatherRequest {
        message: UPDATED_MESSAGE.into(),
        record: record.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/weather/{id}",
    params(("id" = Uuid, Path, description = "record id")),
    responses(
        (status = 200, description = "the record was deleted", body = Message),
        (status = 404, description = "no such record", body = ErrorResponse),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn delete_weather_request<T: Database>(
    db: web::Data<T>,
    id: web::Path<String>,
) -> Result<Response<Message>> {
    let id = parse_id(&id)?;

    if !db.delete_weather_request(id).await? {
        return NotFoundSnafu.fail();
    }

    Ok(Response::new(Message {
        message: DELETED_MESSAGE.into(),
    }))
}

// Ids that are not UUIDs can never match a record.
fn parse_id(value: &str) -> Result<WeatherRequestId> {
    value.parse().ok().context(NotFoundSnafu)
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRequest {
    pub id: Uuid,
    pub location_input: String,
    pub normalized_location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub temperatures: Vec<Temperature>,
    pub maps_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub date: NaiveDate,
    pub temp: f64,
    pub description: Option<String>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWeatherRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Partial update of a record. Blank strings are ignored, numbers may be sent
/// as strings.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWeatherRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub temp: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UpdatedWeatherRequest {
    pub message: String,
    pub record: WeatherRequest,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl TryFrom<UpdateWeatherRequest> for weather_core::UpdateWeatherRequest {
    type Error = weather_core::DateRangeError;

    fn try_from(v: UpdateWeatherRequest) -> std::result::Result<Self, Self::Error> {
        let UpdateWeatherRequest {
            location,
            start_date,
            end_date,
            temp,
            description,
            humidity,
            wind_speed,
        } = v;

        Ok(Self {
            location: non_empty(location),
            start_date: non_empty(start_date).as_deref().map(parse_date).transpose()?,
            end_date: non_empty(end_date).as_deref().map(parse_date).transpose()?,
            temp,
            description: non_empty(description),
            humidity,
            wind_speed,
        })
    }
}

impl From<weather_core::WeatherRequest> for WeatherRequest {
    fn from(v: weather_core::WeatherRequest) -> Self {
        let weather_core::WeatherRequest {
            id,
            location_input,
            normalized_location,
            lat,
            lon,
            start_date,
            end_date,
            temperatures,
            maps_url,
            created_at,
            updated_at,
        } = v;

        Self {
            id: id.into_inner(),
            location_input,
            normalized_location,
            lat,
            lon,
            start_date,
            end_date,
            temperatures: temperatures.into_iter().map(Temperature::from).collect(),
            maps_url,
            created_at,
            updated_at,
        }
    }
}

impl From<TemperatureEntry> for Temperature {
    fn from(v: TemperatureEntry) -> Self {
        let TemperatureEntry {
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

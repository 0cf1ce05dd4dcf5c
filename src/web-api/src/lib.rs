#![deny(rust_2018_idioms)]

use routes::{export, lookup, weather};
use utoipa::OpenApi;
use weather_core::WebApiPort;

pub mod error;
pub mod frontend;
pub mod response;
pub mod routes;
pub mod settings;
pub mod startup;

pub use error::{Error, Result};

pub trait Database: WebApiPort + Clone + Send + Sync + 'static {}

impl<T> Database for T where T: WebApiPort + Clone + Send + Sync + 'static {}

#[derive(OpenApi)]
#[openapi(
    paths(
        weather::create_weather_request,
        weather::weather_requests,
        weather::weather_request,
        weather::update_weather_request,
        weather::delete_weather_request,
        export::export_weather_requests,
        lookup::suggestions,
        lookup::current_weather,
    ),
    components(
        schemas(
            error::ErrorKind,
            error::ErrorResponse,
            weather::WeatherRequest,
            weather::Temperature,
            weather::CreateWeatherRequest,
            weather::UpdateWeatherRequest,
            weather::UpdatedWeatherRequest,
            weather::Message,
            lookup::Suggestion,
            lookup::CurrentLocation,
            lookup::CurrentWeather,
        )
    ),
    tags(
        (name = "weather", description = "weather request records")
    ),
)]
pub struct ApiDoc;

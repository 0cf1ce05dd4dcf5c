use async_trait::async_trait;

use crate::*;

#[async_trait]
pub trait WeatherRequestInbound: Send + Sync {
    async fn add_weather_request(&self, request: NewWeatherRequest) -> Result<WeatherRequest>;
    /// Returns `None` if the record no longer exists.
    async fn update_weather_request(
        &self,
        request: &WeatherRequest,
    ) -> Result<Option<WeatherRequest>>;
    /// Returns `false` if there was nothing to delete.
    async fn delete_weather_request(&self, id: WeatherRequestId) -> Result<bool>;
}

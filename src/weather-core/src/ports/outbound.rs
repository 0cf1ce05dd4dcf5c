use async_trait::async_trait;

use crate::*;

#[async_trait]
pub trait WeatherRequestOutbound: Send + Sync {
    /// All records, newest first.
    async fn weather_requests(&self) -> Result<Vec<WeatherRequest>>;
    async fn weather_request(&self, id: WeatherRequestId) -> Result<Option<WeatherRequest>>;
}

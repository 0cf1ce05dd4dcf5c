use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::*;

/// Volatile store implementing the web api ports, used to run the api without
/// a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<WeatherRequest>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl WeatherRequestInbound for MemoryStore {
    async fn add_weather_request(&self, request: NewWeatherRequest) -> Result<WeatherRequest> {
        let mut records = self.records.write().await;

        // Keeps `created_at` strictly increasing so ordering is deterministic.
        let mut created_at = Utc::now();
        if let Some(last) = records.iter().map(|r| r.created_at).max() {
            if created_at <= last {
                created_at = last + Duration::microseconds(1);
            }
        }

        let NewWeatherRequest {
            location_input,
            normalized_location,
            lat,
            lon,
            start_date,
            end_date,
            temperatures,
            maps_url,
        } = request;

        let record = WeatherRequest {
            id: WeatherRequestId::new(),
            location_input,
            normalized_location,
            lat,
            lon,
            start_date,
            end_date,
            temperatures,
            maps_url,
            created_at,
            updated_at: created_at,
        };

        records.push(record.clone());
        Ok(record)
    }

    async fn update_weather_request(
        &self,
        request: &WeatherRequest,
    ) -> Result<Option<WeatherRequest>> {
        let mut records = self.records.write().await;

        Ok(records.iter_mut().find(|r| r.id == request.id).map(|r| {
            let created_at = r.created_at;
            *r = request.clone();
            r.created_at = created_at;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn delete_weather_request(&self, id: WeatherRequestId) -> Result<bool> {
        let mut records = self.records.write().await;
        let len = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != len)
    }
}

#[async_trait]
impl WeatherRequestOutbound for MemoryStore {
    async fn weather_requests(&self) -> Result<Vec<WeatherRequest>> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn weather_request(&self, id: WeatherRequestId) -> Result<Option<WeatherRequest>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

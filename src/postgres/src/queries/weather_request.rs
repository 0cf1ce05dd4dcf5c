use weather_core::{NewWeatherRequest, WeatherRequestId};

use crate::{
    error::Result,
    models::{temperatures_json, WeatherRequest},
    PostgresAdapter,
};

impl PostgresAdapter {
    pub(crate) async fn add_weather_request_impl(
        &self,
        request: NewWeatherRequest,
    ) -> Result<WeatherRequest> {
        let row = sqlx::query_as::<_, WeatherRequest>(
            r#"
INSERT INTO
    weather_requests (
        location_input,
        normalized_location,
        lat,
        lon,
        start_date,
        end_date,
        temperatures,
        maps_url
    )
VALUES
    ($1, $2, $3, $4, $5, $6, $7, $8)
RETURNING
    *
            "#,
        )
        .bind(&request.location_input)
        .bind(&request.normalized_location)
        .bind(request.lat)
        .bind(request.lon)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(temperatures_json(&request.temperatures))
        .bind(&request.maps_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub(crate) async fn weather_requests_impl(&self) -> Result<Vec<WeatherRequest>> {
        let rows = sqlx::query_as::<_, WeatherRequest>(
            r#"
SELECT
    *
FROM
    weather_requests
ORDER BY
    created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub(crate) async fn weather_request_impl(
        &self,
        id: WeatherRequestId,
    ) -> Result<Option<WeatherRequest>> {
        let row = sqlx::query_as::<_, WeatherRequest>(
            r#"
SELECT
    *
FROM
    weather_requests
WHERE
    id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub(crate) async fn update_weather_request_impl(
        &self,
        request: &weather_core::WeatherRequest,
    ) -> Result<Option<WeatherRequest>> {
        let row = sqlx::query_as::<_, WeatherRequest>(
            r#"
UPDATE weather_requests
SET
    location_input = $2,
    normalized_location = $3,
    lat = $4,
    lon = $5,
    start_date = $6,
    end_date = $7,
    temperatures = $8,
    maps_url = $9,
    updated_at = NOW()
WHERE
    id = $1
RETURNING
    *
            "#,
        )
        .bind(request.id.into_inner())
        .bind(&request.location_input)
        .bind(&request.normalized_location)
        .bind(request.lat)
        .bind(request.lon)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(temperatures_json(&request.temperatures))
        .bind(&request.maps_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub(crate) async fn delete_weather_request_impl(&self, id: WeatherRequestId) -> Result<bool> {
        let result = sqlx::query(
            r#"
DELETE FROM weather_requests
WHERE
    id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

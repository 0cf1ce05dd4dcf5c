use std::str::FromStr;

use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use tracing::{info, instrument};
use weather_core::{
    NewWeatherRequest, WeatherRequest, WeatherRequestId, WeatherRequestInbound,
    WeatherRequestOutbound,
};

use crate::{
    error::{
        error::{ConnectionSnafu, MigrationSnafu},
        Result,
    },
    PsqlSettings,
};

#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pub(crate) pool: PgPool,
}

impl PostgresAdapter {
    pub async fn new(settings: &PsqlSettings) -> Result<PostgresAdapter> {
        let mut opts = PgConnectOptions::from_str(&settings.url).context(ConnectionSnafu)?;

        if !settings.log_statements {
            opts = opts.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .connect_with(opts)
            .await
            .context(ConnectionSnafu)?;

        Ok(PostgresAdapter { pool })
    }

    /// Wraps an already configured pool. Migrations are not run.
    pub fn from_pool(pool: PgPool) -> PostgresAdapter {
        PostgresAdapter { pool }
    }

    #[instrument(skip_all)]
    pub async fn do_migrations(&self) -> Result<()> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .context(MigrationSnafu)?;

        info!("database migrations are up to date");
        Ok(())
    }
}

#[async_trait]
impl WeatherRequestInbound for PostgresAdapter {
    #[instrument(skip_all)]
    async fn add_weather_request(
        &self,
        request: NewWeatherRequest,
    ) -> weather_core::Result<WeatherRequest> {
        Ok(self.add_weather_request_impl(request).await?.try_into()?)
    }

    #[instrument(skip_all, fields(id = %request.id))]
    async fn update_weather_request(
        &self,
        request: &WeatherRequest,
    ) -> weather_core::Result<Option<WeatherRequest>> {
        match self.update_weather_request_impl(request).await? {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn delete_weather_request(&self, id: WeatherRequestId) -> weather_core::Result<bool> {
        Ok(self.delete_weather_request_impl(id).await?)
    }
}

#[async_trait]
impl WeatherRequestOutbound for PostgresAdapter {
    #[instrument(skip_all)]
    async fn weather_requests(&self) -> weather_core::Result<Vec<WeatherRequest>> {
        let records = self
            .weather_requests_impl()
            .await?
            .into_iter()
            .map(WeatherRequest::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn weather_request(
        &self,
        id: WeatherRequestId,
    ) -> weather_core::Result<Option<WeatherRequest>> {
        match self.weather_request_impl(id).await? {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }
}

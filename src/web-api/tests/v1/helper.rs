use std::{future::Future, sync::Once};

use chrono::NaiveDate;
use postgres::PsqlSettings;
use serde_json::{json, Value};
use tracing_subscriber::FmtSubscriber;
use weather_core::{Environment, LogLevel, MemoryStore};
use web_api::{
    routes::weather::{CreateWeatherRequest, WeatherRequest},
    settings::{ApiSettings, Settings},
    startup::App,
};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use super::test_client::ApiClient;

static TRACING: Once = Once::new();
pub static API_KEY: &str = "test-api-key";

pub struct TestHelper {
    pub app: ApiClient,
    pub db: MemoryStore,
    pub upstream: MockServer,
}

impl TestHelper {
    /// Makes `query` geocode to `name, country` with a forecast holding a noon
    /// reading for each of `days`, each preceded by a morning reading.
    pub async fn mock_forecast(
        &self,
        query: &str,
        name: &str,
        country: &str,
        days: &[(NaiveDate, f64)],
    ) {
        let (lat, lon) = coordinates(name);

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", query))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": name, "country": country, "lat": lat, "lon": lon }
            ])))
            .mount(&self.upstream)
            .await;

        let mut list = Vec::new();
        for (date, temp) in days {
            list.push(forecast_entry(&format!("{date} 09:00:00"), temp - 2.));
            list.push(forecast_entry(&format!("{date} 12:00:00"), *temp));
        }

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("lat", lat.to_string()))
            .and(query_param("lon", lon.to_string()))
            .and(query_param("units", "metric"))
            .and(query_param("appid", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": list })))
            .mount(&self.upstream)
            .await;
    }

    pub async fn mock_unknown_location(&self, query: &str) {
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&self.upstream)
            .await;
    }

    pub async fn mock_upstream_failure(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream unavailable"))
            .mount(&self.upstream)
            .await;
    }

    /// Creates a record for `name` covering `start..=end` with one reading per
    /// day, starting at `temp` and rising by one degree per day.
    pub async fn create(
        &self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
        temp: f64,
    ) -> WeatherRequest {
        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .enumerate()
            .map(|(i, d)| (d, temp + i as f64))
            .collect::<Vec<_>>();

        let query = name.to_lowercase();
        self.mock_forecast(&query, name, "NO", &days).await;

        self.app
            .create_weather_request(&CreateWeatherRequest {
                location: Some(query),
                start_date: Some(start.to_string()),
                end_date: Some(end.to_string()),
            })
            .await
            .unwrap()
    }
}

// Distinct coordinates per place keep forecast mocks from overlapping.
fn coordinates(name: &str) -> (f64, f64) {
    let offset = name.bytes().map(f64::from).sum::<f64>() / 100.;
    (50. + offset, 5. + offset)
}

pub fn forecast_entry(dt_txt: &str, temp: f64) -> Value {
    json!({
        "dt_txt": dt_txt,
        "main": { "temp": temp, "humidity": 71.0 },
        "weather": [{ "description": "scattered clouds" }],
        "wind": { "speed": 3.6 },
    })
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub async fn test<T, Fut>(test: T)
where
    T: FnOnce(TestHelper) -> Fut,
    Fut: Future<Output = ()>,
{
    TRACING.call_once(|| {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder()
                .with_max_level(tracing::Level::INFO)
                .finish(),
        )
        .unwrap();
    });

    let upstream = MockServer::start().await;

    let settings = Settings {
        log_level: LogLevel::Debug,
        environment: Environment::Test,
        api: ApiSettings {
            ip: "127.0.0.1".to_string(),
            port: 0,
            num_workers: Some(1),
            permissive_cors: false,
        },
        postgres: PsqlSettings {
            url: "postgres://unused@localhost/unused".to_string(),
            max_connections: 1,
            log_statements: false,
            run_migrations: false,
        },
        openweather: openweather::Settings {
            api_key: API_KEY.to_string(),
            geocoding_url: format!("{}/geo/1.0", upstream.uri()),
            data_url: format!("{}/data/2.5", upstream.uri()),
            timeout_secs: Some(5),
        },
    };

    let db = MemoryStore::new();
    let app = App::with_database(&settings, db.clone()).unwrap();
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async { app.run().await.unwrap() });

    test(TestHelper {
        app: ApiClient::new(address),
        db,
        upstream,
    })
    .await;
}

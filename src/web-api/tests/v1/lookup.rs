use reqwest::StatusCode;
use serde_json::json;
use web_api::{error::ErrorKind, routes::lookup::CurrentLocation};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, ResponseTemplate,
};

use super::helper::{test, API_KEY};

#[tokio::test]
async fn test_suggestions_returns_place_names() {
    test(|helper| async move {
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Ber"))
            .and(query_param("limit", "5"))
            .and(query_param("appid", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "Bergen", "country": "NO", "lat": 60.39, "lon": 5.32 },
                { "name": "Berlin", "country": "DE", "lat": 52.52, "lon": 13.40 },
                { "name": "Bern", "country": "CH", "lat": 46.94, "lon": 7.44 },
            ])))
            .expect(1)
            .mount(&helper.upstream)
            .await;

        let suggestions = helper.app.suggestions("Ber").await.unwrap();

        assert_eq!(
            suggestions.into_iter().map(|s| s.name).collect::<Vec<_>>(),
            vec!["Bergen, NO", "Berlin, DE", "Bern, CH"]
        );
    })
    .await;
}

#[tokio::test]
async fn test_suggestions_with_short_query_is_bad_request() {
    test(|helper| async move {
        for query in ["", "B", " B "] {
            let error = helper.app.suggestions(query).await.unwrap_err();
            assert_eq!(error.status, StatusCode::BAD_REQUEST);
            assert_eq!(error.error, ErrorKind::QueryTooShort);
            assert_eq!(error.message, "Type at least 2 letters");
        }

        assert!(helper.upstream.received_requests().await.unwrap().is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_suggestions_without_query_parameter_is_bad_request() {
    test(|helper| async move {
        let response = helper
            .app
            .request("api/weather/suggest", reqwest::Method::GET, None::<()>)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    })
    .await;
}

#[tokio::test]
async fn test_current_weather_at_the_equator() {
    test(|helper| async move {
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "0"))
            .and(query_param("lon", "10.5"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Libreville",
                "sys": { "country": "GA" },
                "main": { "temp": 27.4, "humidity": 84.0 },
                "weather": [{ "description": "light rain" }],
                "wind": { "speed": 2.1 },
            })))
            .mount(&helper.upstream)
            .await;

        let current = helper
            .app
            .current_weather(&CurrentLocation {
                lat: Some(0.),
                lon: Some(10.5),
            })
            .await
            .unwrap();

        assert_eq!(current.location_name, "Libreville, GA");
        assert_eq!(current.temp, 27.4);
        assert_eq!(current.description, "light rain");
        assert_eq!(current.humidity, Some(84.));
        assert_eq!(current.wind_speed, Some(2.1));
    })
    .await;
}

#[tokio::test]
async fn test_current_weather_requires_both_coordinates() {
    test(|helper| async move {
        let error = helper
            .app
            .current_weather_raw(json!({ "lat": 59.9 }))
            .await
            .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error, ErrorKind::MissingField);
        assert_eq!(error.message, "lon is required");

        let error = helper
            .app
            .current_weather_raw(json!({ "lat": "", "lon": 10.7 }))
            .await
            .unwrap_err();
        assert_eq!(error.message, "lat is required");

        assert!(helper.upstream.received_requests().await.unwrap().is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_current_weather_upstream_failure_is_internal_error() {
    test(|helper| async move {
        helper.mock_upstream_failure("/data/2.5/weather", 500).await;

        let error = helper
            .app
            .current_weather(&CurrentLocation {
                lat: Some(59.91),
                lon: Some(10.75),
            })
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error, ErrorKind::UpstreamFailure);
        assert!(!error.message.contains(API_KEY));
    })
    .await;
}

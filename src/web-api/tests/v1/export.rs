use reqwest::StatusCode;
use web_api::error::ErrorKind;

use super::helper::{date, test};

#[tokio::test]
async fn test_json_export_has_one_entry_per_record() {
    test(|helper| async move {
        let oslo = helper
            .create("Oslo", date("2025-01-10"), date("2025-01-11"), -2.)
            .await;
        let bergen = helper
            .create("Bergen", date("2025-01-10"), date("2025-01-10"), 5.)
            .await;

        let download = helper.app.export("json").await.unwrap();

        assert!(download.content_type.starts_with("application/json"));
        assert!(download.content_disposition.contains("attachment"));
        assert!(download.content_disposition.contains("weather.json"));

        let entries: Vec<serde_json::Value> = serde_json::from_str(&download.body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["id"], bergen.id.to_string());
        assert_eq!(entries[0]["temp"], 5.);
        assert_eq!(entries[1]["id"], oslo.id.to_string());
        assert_eq!(entries[1]["normalizedLocation"], "Oslo, NO");
        assert_eq!(entries[1]["temp"], -2.);
        assert!(entries[1].get("temperatures").is_none());
    })
    .await;
}

#[tokio::test]
async fn test_csv_export_has_header_and_one_row_per_record() {
    test(|helper| async move {
        for name in ["Oslo", "Bergen", "Tromso"] {
            helper
                .create(name, date("2025-01-10"), date("2025-01-11"), 1.)
                .await;
        }

        let download = helper.app.export("csv").await.unwrap();

        assert!(download.content_type.starts_with("text/csv"));
        assert!(download.content_disposition.contains("weather.csv"));

        let lines = download.body.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "id,locationInput,normalizedLocation,startDate,endDate,temp,description,mapsUrl,createdAt"
        );
        assert!(lines[1].starts_with(&format!(
            "{},tromso,Tromso, NO,2025-01-10T00:00:00.000Z,2025-01-11T00:00:00.000Z,1,\"scattered clouds\",",
            helper.app.weather_requests().await.unwrap()[0].id
        )));
    })
    .await;
}

#[tokio::test]
async fn test_markdown_export_has_one_bullet_per_record() {
    test(|helper| async move {
        helper
            .create("Oslo", date("2025-01-10"), date("2025-01-12"), 3.)
            .await;
        helper
            .create("Bergen", date("2025-01-11"), date("2025-01-11"), 7.5)
            .await;

        let download = helper.app.export("md").await.unwrap();

        assert!(download.content_type.starts_with("text/markdown"));
        assert!(download.content_disposition.contains("weather.md"));

        let lines = download.body.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("- **")));
        assert!(lines[0].starts_with("- **Bergen, NO** (2025-01-11 → 2025-01-11): 7.5°C, scattered clouds [Maps]("));
        assert!(lines[1].contains("3°C"));
    })
    .await;
}

#[tokio::test]
async fn test_export_without_records_is_empty() {
    test(|helper| async move {
        let json = helper.app.export("json").await.unwrap();
        assert_eq!(json.body, "[]");

        let csv = helper.app.export("csv").await.unwrap();
        assert_eq!(csv.body.lines().count(), 1);

        let md = helper.app.export("md").await.unwrap();
        assert!(md.body.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_export_reflects_updates_to_first_entry() {
    test(|helper| async move {
        let created = helper
            .create("Oslo", date("2025-01-10"), date("2025-01-11"), 1.)
            .await;
        helper
            .app
            .update_weather_request_raw(
                &created.id.to_string(),
                serde_json::json!({ "temp": 30, "description": "hot" }),
            )
            .await
            .unwrap();

        let download = helper.app.export("json").await.unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&download.body).unwrap();

        assert_eq!(entries[0]["temp"], 30.);
        assert_eq!(entries[0]["description"], "hot");
    })
    .await;
}

#[tokio::test]
async fn test_unsupported_export_format_is_bad_request() {
    test(|helper| async move {
        for format in ["xml", "markdown", "JSON"] {
            let error = helper.app.export(format).await.unwrap_err();
            assert_eq!(error.status, StatusCode::BAD_REQUEST);
            assert_eq!(error.error, ErrorKind::UnsupportedFormat);
        }
    })
    .await;
}

use chrono::Duration;
use sqlx::PgPool;
use weather_core::{Error, WeatherRequestId, WeatherRequestInbound, WeatherRequestOutbound};

use crate::helper::{adapter, date, new_request};

#[sqlx::test(migrations = false)]
async fn test_migrations_can_be_rerun(pool: PgPool) {
    let db = adapter(pool).await;
    db.do_migrations().await.unwrap();

    assert!(db.weather_requests().await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
async fn test_add_assigns_identity_and_timestamps(pool: PgPool) {
    let db = adapter(pool).await;
    let request = new_request("Trondheim", "2025-01-10", "2025-01-12", -4.);

    let record = db.add_weather_request(request.clone()).await.unwrap();

    assert_eq!(record.location_input, "trondheim");
    assert_eq!(record.normalized_location, "Trondheim, NO");
    assert_eq!(record.lat, Some(63.43));
    assert_eq!(record.start_date, date("2025-01-10"));
    assert_eq!(record.end_date, date("2025-01-12"));
    assert_eq!(record.maps_url, request.maps_url);
    assert_eq!(record.created_at, record.updated_at);

    let stored = db.weather_request(record.id).await.unwrap().unwrap();
    assert_eq!(stored, record);
}

#[sqlx::test(migrations = false)]
async fn test_temperatures_round_trip_through_jsonb(pool: PgPool) {
    let db = adapter(pool).await;
    let request = new_request("Bodo", "2025-01-10", "2025-01-14", 0.5);

    let record = db.add_weather_request(request.clone()).await.unwrap();
    let stored = db.weather_request(record.id).await.unwrap().unwrap();

    assert_eq!(stored.temperatures, request.temperatures);
    assert_eq!(stored.temperatures.len(), 5);
    assert_eq!(stored.temperatures[0].wind_speed, None);
    assert_eq!(stored.temperatures[4].date, date("2025-01-10") + Duration::days(4));
}

#[sqlx::test(migrations = false)]
async fn test_list_is_newest_first(pool: PgPool) {
    let db = adapter(pool).await;

    let mut ids = Vec::new();
    for location in ["Oslo", "Bergen", "Tromso"] {
        let record = db
            .add_weather_request(new_request(location, "2025-01-10", "2025-01-10", 1.))
            .await
            .unwrap();
        ids.push(record.id);
    }
    ids.reverse();

    let records = db.weather_requests().await.unwrap();

    assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
    assert!(records.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[sqlx::test(migrations = false)]
async fn test_update_refreshes_updated_at_and_keeps_created_at(pool: PgPool) {
    let db = adapter(pool).await;
    let created = db
        .add_weather_request(new_request("Oslo", "2025-01-10", "2025-01-11", 1.))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.location_input = "Paris".into();
    changed.normalized_location = "Paris".into();
    changed.end_date = date("2025-01-12");
    changed.temperatures[0].temp = 21.;
    changed.temperatures[0].description = Some("sunny".into());

    let updated = db.update_weather_request(&changed).await.unwrap().unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.location_input, "Paris");
    assert_eq!(updated.end_date, date("2025-01-12"));
    assert_eq!(updated.temperatures[0].temp, 21.);
    assert_eq!(updated.temperatures[1], created.temperatures[1]);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let stored = db.weather_request(created.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[sqlx::test(migrations = false)]
async fn test_update_of_missing_record_is_none(pool: PgPool) {
    let db = adapter(pool).await;
    let mut record = db
        .add_weather_request(new_request("Oslo", "2025-01-10", "2025-01-11", 1.))
        .await
        .unwrap();
    record.id = WeatherRequestId::new();

    assert!(db.update_weather_request(&record).await.unwrap().is_none());
}

#[sqlx::test(migrations = false)]
async fn test_delete_reports_whether_a_row_was_removed(pool: PgPool) {
    let db = adapter(pool).await;
    let record = db
        .add_weather_request(new_request("Oslo", "2025-01-10", "2025-01-11", 1.))
        .await
        .unwrap();

    assert!(db.delete_weather_request(record.id).await.unwrap());
    assert!(db.weather_request(record.id).await.unwrap().is_none());
    assert!(!db.delete_weather_request(record.id).await.unwrap());
    assert!(!db.delete_weather_request(WeatherRequestId::new()).await.unwrap());
}

#[sqlx::test(migrations = false)]
async fn test_end_before_start_is_rejected_by_the_table(pool: PgPool) {
    let db = adapter(pool).await;
    let mut request = new_request("Oslo", "2025-01-10", "2025-01-11", 1.);
    request.start_date = date("2025-01-12");

    let error = db.add_weather_request(request).await.unwrap_err();

    assert!(matches!(error, Error::Storage { .. }));
    assert!(db.weather_requests().await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
async fn test_malformed_temperatures_fail_conversion(pool: PgPool) {
    let db = adapter(pool.clone()).await;
    let record = db
        .add_weather_request(new_request("Oslo", "2025-01-10", "2025-01-11", 1.))
        .await
        .unwrap();

    sqlx::query("UPDATE weather_requests SET temperatures = '[{\"temp\": \"warm\"}]' WHERE id = $1")
        .bind(record.id.into_inner())
        .execute(&pool)
        .await
        .unwrap();

    let error = db.weather_request(record.id).await.unwrap_err();
    assert!(error.to_string().contains(&record.id.to_string()));
}
